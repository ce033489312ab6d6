pub const MAX_PARTICLES: usize = 50;
pub const PIXELS_PER_PARTICLE: f64 = 20.0;
pub const LINK_MAX_OPACITY: f64 = 0.2;
pub const LINK_WIDTH: f64 = 0.5;

const RADIUS_MIN: f64 = 1.0;
const RADIUS_SPREAD: f64 = 2.0;
const SPEED_SPREAD: f64 = 0.5;
const ALPHA_MIN: f64 = 0.1;
const ALPHA_SPREAD: f64 = 0.3;
const TINT: (u8, u8, u8) = (99, 102, 241);

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: &str);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: &str);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub radius: f64,
    pub alpha: f64,
}

impl Particle {
    pub fn color(&self) -> String {
        tint(self.alpha)
    }

    fn advance(&mut self, width: f64, height: f64) {
        self.x += self.dx;
        self.y += self.dy;

        if (self.x <= 0.0 && self.dx < 0.0) || (self.x >= width && self.dx > 0.0) {
            self.dx = -self.dx;
        }
        if (self.y <= 0.0 && self.dy < 0.0) || (self.y >= height && self.dy > 0.0) {
            self.dy = -self.dy;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub opacity: f64,
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    link_distance: f64,
}

/// Number of particles for a viewport, always within `1..=max`.
pub fn particle_count(viewport_width: f64, max: usize) -> usize {
    let max = max.clamp(1, MAX_PARTICLES);
    let by_width = (viewport_width.max(0.0) / PIXELS_PER_PARTICLE).floor() as usize;
    by_width.clamp(1, max)
}

pub fn connection_opacity(distance: f64, link_distance: f64) -> f64 {
    if link_distance <= 0.0 || distance >= link_distance {
        return 0.0;
    }

    LINK_MAX_OPACITY * (1.0 - distance.max(0.0) / link_distance)
}

fn tint(alpha: f64) -> String {
    format!("rgba({}, {}, {}, {alpha:.3})", TINT.0, TINT.1, TINT.2)
}

impl ParticleField {
    /// Seeds a field sized to the viewport. `random` must yield values in `[0, 1)`.
    pub fn seed(
        width: f64,
        height: f64,
        max: usize,
        link_distance: f64,
        mut random: impl FnMut() -> f64,
    ) -> Self {
        let count = particle_count(width, max);
        let particles = (0..count)
            .map(|_| Particle {
                x: random() * width,
                y: random() * height,
                radius: random() * RADIUS_SPREAD + RADIUS_MIN,
                dx: (random() - 0.5) * SPEED_SPREAD,
                dy: (random() - 0.5) * SPEED_SPREAD,
                alpha: random() * ALPHA_SPREAD + ALPHA_MIN,
            })
            .collect();

        Self {
            particles,
            width,
            height,
            link_distance,
        }
    }

    pub fn from_particles(particles: Vec<Particle>, width: f64, height: f64, link_distance: f64) -> Self {
        Self {
            particles,
            width,
            height,
            link_distance,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Adopts new bounds. Existing positions are left where they are.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.advance(width, height);
        }
    }

    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();

        for (index, a) in self.particles.iter().enumerate() {
            for b in &self.particles[index + 1..] {
                let distance = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                if distance < self.link_distance {
                    links.push(Link {
                        from: (a.x, a.y),
                        to: (b.x, b.y),
                        opacity: connection_opacity(distance, self.link_distance),
                    });
                }
            }
        }

        links
    }

    pub fn render_frame(&mut self, surface: &mut impl Surface) {
        surface.clear(self.width, self.height);
        self.step();

        for particle in &self.particles {
            surface.fill_disc(particle.x, particle.y, particle.radius, &particle.color());
        }

        for link in self.links() {
            surface.stroke_line(link.from, link.to, LINK_WIDTH, &tint(link.opacity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        discs: usize,
        lines: Vec<String>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, _width: f64, _height: f64) {
            self.clears += 1;
        }

        fn fill_disc(&mut self, _x: f64, _y: f64, _radius: f64, _color: &str) {
            self.discs += 1;
        }

        fn stroke_line(&mut self, _from: (f64, f64), _to: (f64, f64), _width: f64, color: &str) {
            self.lines.push(color.to_string());
        }
    }

    fn particle(x: f64, y: f64, dx: f64, dy: f64) -> Particle {
        Particle {
            x,
            y,
            dx,
            dy,
            radius: 1.5,
            alpha: 0.2,
        }
    }

    #[test]
    fn particle_count_stays_between_one_and_fifty() {
        for width in [0.0, 5.0, 19.9, 20.0, 640.0, 999.0, 1_000.0, 3_840.0, f64::MAX] {
            let count = particle_count(width, MAX_PARTICLES);
            assert!((1..=MAX_PARTICLES).contains(&count), "width {width} gave {count}");
        }
        assert_eq!(particle_count(640.0, MAX_PARTICLES), 32);
        assert_eq!(particle_count(640.0, 10), 10);
    }

    #[test]
    fn bounce_flips_only_the_crossing_component() {
        let mut field = ParticleField::from_particles(vec![particle(99.8, 50.0, 0.4, -0.3)], 100.0, 100.0, 100.0);

        field.step();

        let moved = &field.particles()[0];
        assert_eq!(moved.dx, -0.4);
        assert_eq!(moved.dy, -0.3);
    }

    #[test]
    fn particles_left_outside_after_shrink_head_back_in() {
        let mut field = ParticleField::from_particles(vec![particle(150.0, 20.0, 0.25, 0.0)], 200.0, 100.0, 100.0);
        field.resize(100.0, 100.0);

        field.step();
        let after_first = field.particles()[0].x;
        field.step();

        assert_eq!(field.particles()[0].dx, -0.25);
        assert!(field.particles()[0].x < after_first);
        assert_eq!(field.size(), (100.0, 100.0));
    }

    #[test]
    fn connection_opacity_is_zero_at_and_beyond_threshold() {
        assert_eq!(connection_opacity(100.0, 100.0), 0.0);
        assert_eq!(connection_opacity(250.0, 100.0), 0.0);
        assert!((connection_opacity(0.0, 100.0) - LINK_MAX_OPACITY).abs() < 1e-12);
    }

    #[test]
    fn connection_opacity_grows_as_distance_shrinks() {
        let mut previous = connection_opacity(99.0, 100.0);
        for distance in (0..99).rev() {
            let current = connection_opacity(f64::from(distance), 100.0);
            assert!(current > previous);
            previous = current;
        }
    }

    #[test]
    fn links_cover_each_close_pair_once() {
        let field = ParticleField::from_particles(
            vec![
                particle(0.0, 0.0, 0.0, 0.0),
                particle(30.0, 40.0, 0.0, 0.0),
                particle(500.0, 500.0, 0.0, 0.0),
            ],
            1_000.0,
            1_000.0,
            100.0,
        );

        let links = field.links();
        assert_eq!(links.len(), 1);
        assert!((links[0].opacity - 0.2 * 0.5).abs() < 1e-12);
    }

    #[test]
    fn seeded_values_follow_the_configured_ranges() {
        let mut sequence = [0.0, 0.5, 0.99].into_iter().cycle();
        let field = ParticleField::seed(400.0, 300.0, MAX_PARTICLES, 100.0, || sequence.next().unwrap_or(0.0));

        assert_eq!(field.particles().len(), 20);
        for p in field.particles() {
            assert!((0.0..400.0).contains(&p.x));
            assert!((0.0..300.0).contains(&p.y));
            assert!((RADIUS_MIN..RADIUS_MIN + RADIUS_SPREAD).contains(&p.radius));
            assert!(p.dx.abs() <= SPEED_SPREAD / 2.0);
            assert!((ALPHA_MIN..ALPHA_MIN + ALPHA_SPREAD).contains(&p.alpha));
        }
    }

    #[test]
    fn frame_clears_then_draws_discs_and_links() {
        let mut field = ParticleField::from_particles(
            vec![particle(10.0, 10.0, 0.0, 0.0), particle(20.0, 10.0, 0.0, 0.0)],
            100.0,
            100.0,
            100.0,
        );
        let mut recorder = Recorder::default();

        field.render_frame(&mut recorder);

        assert_eq!(recorder.clears, 1);
        assert_eq!(recorder.discs, 2);
        assert_eq!(recorder.lines, vec!["rgba(99, 102, 241, 0.180)".to_string()]);
    }
}
