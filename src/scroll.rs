use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LockHolder {
    MobileMenu,
    CertificateModal,
}

/// Background scroll lock shared by overlays. Acquire and release are
/// idempotent per holder; the page scrolls again only when no holder remains.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrollLock {
    holders: BTreeSet<LockHolder>,
}

impl ScrollLock {
    pub fn is_locked(&self) -> bool {
        !self.holders.is_empty()
    }

    pub fn acquire(&mut self, holder: LockHolder) -> bool {
        self.holders.insert(holder)
    }

    pub fn release(&mut self, holder: LockHolder) -> bool {
        self.holders.remove(&holder)
    }

    pub fn overflow(&self) -> &'static str {
        if self.is_locked() {
            "hidden"
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_acquire_is_a_single_lock() {
        let mut lock = ScrollLock::default();

        assert!(lock.acquire(LockHolder::CertificateModal));
        assert!(!lock.acquire(LockHolder::CertificateModal));
        assert!(lock.release(LockHolder::CertificateModal));
        assert!(!lock.is_locked());
        assert!(!lock.release(LockHolder::CertificateModal));
    }

    #[test]
    fn page_stays_locked_while_another_overlay_holds_it() {
        let mut lock = ScrollLock::default();
        lock.acquire(LockHolder::MobileMenu);
        lock.acquire(LockHolder::CertificateModal);

        lock.release(LockHolder::CertificateModal);

        assert!(lock.is_locked());
        assert_eq!(lock.overflow(), "hidden");
        lock.release(LockHolder::MobileMenu);
        assert_eq!(lock.overflow(), "");
    }
}
