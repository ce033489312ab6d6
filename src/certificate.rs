use url::Url;

pub const FALLBACK_EXTENSION: &str = "jpg";
const DOCUMENT_EXTENSIONS: [&str; 1] = ["pdf"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CertificateKind {
    Image,
    Document,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateFile {
    pub source: String,
    pub title: String,
    pub filename: String,
    pub kind: CertificateKind,
}

impl CertificateFile {
    pub fn new(source: &str, title: &str) -> Self {
        let extension = source_extension(source);
        let kind = match extension.as_deref() {
            Some(ext) if DOCUMENT_EXTENSIONS.contains(&ext) => CertificateKind::Document,
            _ => CertificateKind::Image,
        };

        Self {
            source: source.to_string(),
            title: title.to_string(),
            filename: certificate_filename(title, source),
            kind,
        }
    }
}

/// Lowercases ASCII alphanumerics and writes `_` for every UTF-16 unit of
/// anything else, so an astral character such as an emoji becomes `__`.
pub fn sanitize_title(title: &str) -> String {
    let mut sanitized = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
        } else {
            sanitized.extend(std::iter::repeat('_').take(ch.len_utf16()));
        }
    }
    sanitized
}

/// Lowercased extension of the last path segment, ignoring query and fragment.
pub fn source_extension(source: &str) -> Option<String> {
    let base = Url::parse("http://localhost/").ok()?;
    let resolved = base.join(source.trim()).ok()?;
    let segment = resolved.path_segments()?.last()?;
    let (stem, extension) = segment.rsplit_once('.')?;

    if stem.is_empty() || extension.is_empty() || !extension.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        return None;
    }

    Some(extension.to_ascii_lowercase())
}

pub fn certificate_filename(title: &str, source: &str) -> String {
    let extension = source_extension(source).unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
    format!("{}_certificate.{extension}", sanitize_title(title))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Open,
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowOutcome {
    Opened,
    Replaced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitSignal {
    Overlay,
    Descendant,
    FallbackTimer,
}

/// Single overlay slot. Showing while open swaps the certificate in place, so
/// there is never more than one overlay or one scroll lock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateModal {
    phase: ModalPhase,
    file: Option<CertificateFile>,
}

impl Default for CertificateModal {
    fn default() -> Self {
        Self {
            phase: ModalPhase::Closed,
            file: None,
        }
    }
}

impl CertificateModal {
    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn file(&self) -> Option<&CertificateFile> {
        self.file.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    pub fn show(&mut self, file: CertificateFile) -> ShowOutcome {
        let outcome = if self.is_mounted() {
            ShowOutcome::Replaced
        } else {
            ShowOutcome::Opened
        };

        self.file = Some(file);
        self.phase = ModalPhase::Open;
        outcome
    }

    pub fn request_close(&mut self) -> bool {
        if self.phase != ModalPhase::Open {
            return false;
        }

        self.phase = ModalPhase::Closing;
        true
    }

    /// Removes the overlay once its own exit transition ends or the fallback
    /// timer fires. Ends bubbling up from children are ignored.
    pub fn finish_exit(&mut self, signal: ExitSignal) -> bool {
        if signal == ExitSignal::Descendant {
            return false;
        }

        self.finish_close()
    }

    /// Returns true exactly once per close.
    pub fn finish_close(&mut self) -> bool {
        if self.phase != ModalPhase::Closing {
            return false;
        }

        self.phase = ModalPhase::Closed;
        self.file = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_non_alphanumeric_character_becomes_an_underscore() {
        assert_eq!(sanitize_title("AI & ML Cert!!"), "ai___ml_cert__");
        assert_eq!(sanitize_title("Résumé 2024"), "r_sum__2024");
    }

    #[test]
    fn astral_characters_count_as_two_units() {
        assert_eq!(sanitize_title("🚀 Launch"), "___launch");
        assert_eq!(
            certificate_filename("🏆 Winner", "/c/w.png"),
            "___winner_certificate.png"
        );
    }

    #[test]
    fn filename_uses_source_extension_or_fallback() {
        assert_eq!(
            certificate_filename("AI & ML Cert!!", "/certificates/ai-ml.PDF"),
            "ai___ml_cert___certificate.pdf"
        );
        assert_eq!(
            certificate_filename("Hack", "/certificates/hack?v=2"),
            "hack_certificate.jpg"
        );
        assert_eq!(
            certificate_filename("Hack", "https://cdn.example.com/c/hack.png#page=1"),
            "hack_certificate.png"
        );
    }

    #[test]
    fn dotfiles_and_trailing_dots_have_no_extension() {
        assert_eq!(source_extension("/certs/.hidden"), None);
        assert_eq!(source_extension("/certs/name."), None);
        assert_eq!(source_extension("/certs/v1.2/scan"), None);
    }

    #[test]
    fn pdf_sources_render_as_documents() {
        assert_eq!(CertificateFile::new("/c/a.pdf", "A").kind, CertificateKind::Document);
        assert_eq!(CertificateFile::new("/c/a.webp", "A").kind, CertificateKind::Image);
        assert_eq!(CertificateFile::new("/c/a", "A").kind, CertificateKind::Image);
    }

    #[test]
    fn showing_twice_keeps_one_overlay() {
        let mut modal = CertificateModal::default();

        assert_eq!(modal.show(CertificateFile::new("/c/a.png", "A")), ShowOutcome::Opened);
        assert_eq!(modal.show(CertificateFile::new("/c/b.png", "B")), ShowOutcome::Replaced);
        assert_eq!(modal.file().map(|file| file.title.as_str()), Some("B"));
    }

    #[test]
    fn close_completes_exactly_once() {
        let mut modal = CertificateModal::default();
        modal.show(CertificateFile::new("/c/a.png", "A"));

        assert!(modal.request_close());
        assert!(!modal.request_close());
        assert!(modal.finish_close());
        assert!(!modal.finish_close());
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert!(modal.file().is_none());
    }

    #[test]
    fn child_transition_ends_do_not_cut_the_exit_short() {
        let mut modal = CertificateModal::default();
        modal.show(CertificateFile::new("/c/a.png", "A"));
        modal.request_close();

        assert!(!modal.finish_exit(ExitSignal::Descendant));
        assert_eq!(modal.phase(), ModalPhase::Closing);
        assert!(modal.finish_exit(ExitSignal::Overlay));
        assert!(!modal.finish_exit(ExitSignal::FallbackTimer));
        assert_eq!(modal.phase(), ModalPhase::Closed);
    }

    #[test]
    fn reopening_during_exit_cancels_the_close() {
        let mut modal = CertificateModal::default();
        modal.show(CertificateFile::new("/c/a.png", "A"));
        modal.request_close();

        assert_eq!(modal.show(CertificateFile::new("/c/b.png", "B")), ShowOutcome::Replaced);
        assert!(!modal.finish_close());
        assert_eq!(modal.phase(), ModalPhase::Open);
    }
}
