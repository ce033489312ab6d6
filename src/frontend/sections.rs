use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use yew::prelude::*;

use super::reveal::use_scroll_reveal;
use super::rotator::{ColorBadge, QuoteRotator, TypingBadge};
use crate::certificate::CertificateFile;
use crate::config::{BadgeMode, SiteConfig};
use crate::content::{Achievement, BadgeText, ExperienceEntry, Profile, Project, Quote, SkillGroup, Stat};
use crate::counter::CountUp;

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    use_scroll_reveal(node.clone());

    html! {
        <div ref={node} class={classes!(props.class.clone(), "fade-in")}>
            {props.children.clone()}
        </div>
    }
}

struct CountLoop {
    count: RefCell<CountUp>,
    shown: UseStateHandle<u32>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl CountLoop {
    fn schedule(self: &Rc<Self>) {
        let count_loop = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            count_loop.frame.borrow_mut().take();
            let value = count_loop.count.borrow_mut().tick();
            count_loop.shown.set(value);
            if !count_loop.count.borrow().is_finished() {
                count_loop.schedule();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn stop(&self) {
        self.frame.borrow_mut().take();
    }
}

#[derive(Properties, PartialEq)]
pub struct StatCounterProps {
    pub stat: Stat,
}

#[function_component(StatCounter)]
pub fn stat_counter(props: &StatCounterProps) -> Html {
    let node = use_node_ref();
    let revealed = use_scroll_reveal(node.clone());
    let shown = use_state(|| 0u32);

    {
        let shown = shown.clone();
        let target = props.stat.value;
        use_effect_with(revealed, move |revealed| {
            let count_loop = revealed.then(|| {
                let count_loop = Rc::new(CountLoop {
                    count: RefCell::new(CountUp::new(target)),
                    shown,
                    frame: RefCell::new(None),
                });
                count_loop.schedule();
                count_loop
            });

            move || {
                if let Some(count_loop) = count_loop {
                    count_loop.stop();
                }
            }
        });
    }

    html! {
        <div ref={node} class="stat fade-in">
            <span class="stat-number">{format!("{}{}", *shown, props.stat.suffix)}</span>
            <span class="stat-label">{props.stat.label.clone()}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub profile: Profile,
    pub badges: Rc<Vec<BadgeText>>,
    pub stats: Rc<Vec<Stat>>,
    pub config: Rc<SiteConfig>,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let badge = match props.config.badge_mode {
        BadgeMode::Typing => html! { <TypingBadge badges={props.badges.clone()} config={props.config.clone()} /> },
        BadgeMode::Color => html! { <ColorBadge badges={props.badges.clone()} config={props.config.clone()} /> },
    };

    html! {
        <section id="home" class="hero">
            <div class="hero-content">
                {badge}
                <h1 class="hero-title">{props.profile.name.clone()}</h1>
                <p class="hero-subtitle">{props.profile.headline.clone()}</p>
                <div class="hero-buttons">
                    <a class="btn btn-primary" href="#projects">{"View My Work"}</a>
                    <a class="btn btn-secondary" href="#contact">{"Get In Touch"}</a>
                </div>
                <div class="stats">
                    { for props.stats.iter().map(|stat| html! { <StatCounter stat={stat.clone()} /> }) }
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct AboutProps {
    pub profile: Profile,
    pub quotes: Rc<Vec<Quote>>,
    pub quote_interval_ms: u32,
}

#[function_component(About)]
pub fn about(props: &AboutProps) -> Html {
    html! {
        <section id="about" class="about-section">
            <h2 class="section-title">{"About Me"}</h2>
            <Reveal class="about-content">
                <p>{props.profile.summary.clone()}</p>
                <QuoteRotator quotes={props.quotes.clone()} interval_ms={props.quote_interval_ms} />
            </Reveal>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProjectCardProps {
    pub project: Project,
}

#[function_component(ProjectCard)]
pub fn project_card(props: &ProjectCardProps) -> Html {
    let project = &props.project;
    let store_link = project.store_link().map(|link| {
        html! {
            <a class="project-link" href={link.to_string()} target="_blank" rel="noopener noreferrer">
                <i class="fas fa-external-link-alt"></i>{" Store"}
            </a>
        }
    });

    html! {
        <Reveal class="project-card">
            <div class="project-header">
                <h3 class="project-title">{project.title.clone()}</h3>
                <div class="project-badges">
                    <span class={classes!("project-status", project.is_live().then_some("live"))}>
                        {project.status.clone()}
                    </span>
                    <span class="project-role">{project.role.clone()}</span>
                </div>
            </div>
            <p class="project-description">{project.description.clone()}</p>
            <div class="project-tech">
                { for project.technologies.iter().map(|tech| html! { <span class="tech-tag">{tech.clone()}</span> }) }
            </div>
            <div class="project-links">
                {store_link}
                <a class="project-link" href={project.github_link.clone()} target="_blank" rel="noopener noreferrer">
                    <i class="fab fa-github"></i>{" GitHub"}
                </a>
            </div>
        </Reveal>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProjectsProps {
    pub projects: Rc<Vec<Project>>,
}

#[function_component(Projects)]
pub fn projects(props: &ProjectsProps) -> Html {
    html! {
        <section id="projects" class="projects-section">
            <h2 class="section-title">{"Featured Projects"}</h2>
            <div class="projects-grid">
                { for props.projects.iter().map(|project| html! { <ProjectCard project={project.clone()} /> }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct TimelineItemProps {
    pub entry: ExperienceEntry,
}

#[function_component(TimelineItem)]
pub fn timeline_item(props: &TimelineItemProps) -> Html {
    let entry = &props.entry;
    let achievements = (!entry.achievements.is_empty()).then(|| {
        html! {
            <div class="timeline-achievements">
                <h4>{"Key Achievements:"}</h4>
                <ul>
                    { for entry.achievements.iter().map(|item| html! { <li>{item.clone()}</li> }) }
                </ul>
            </div>
        }
    });

    html! {
        <Reveal class="timeline-item">
            <div class="timeline-dot"></div>
            <div class="timeline-content">
                <span class="timeline-date">{entry.period.clone()}</span>
                <h3>{entry.title.clone()}</h3>
                <h4 class="timeline-company">{entry.company.clone()}</h4>
                <p>{entry.description.clone()}</p>
                {achievements}
            </div>
        </Reveal>
    }
}

#[derive(Properties, PartialEq)]
pub struct ExperienceProps {
    pub entries: Rc<Vec<ExperienceEntry>>,
}

#[function_component(Experience)]
pub fn experience(props: &ExperienceProps) -> Html {
    html! {
        <section id="experience" class="experience-section">
            <h2 class="section-title">{"Experience"}</h2>
            <div class="timeline">
                { for props.entries.iter().map(|entry| html! { <TimelineItem entry={entry.clone()} /> }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct AchievementCardProps {
    pub achievement: Achievement,
    pub on_view: Callback<CertificateFile>,
}

#[function_component(AchievementCard)]
pub fn achievement_card(props: &AchievementCardProps) -> Html {
    let achievement = &props.achievement;
    let on_view = {
        let on_view = props.on_view.clone();
        let source = achievement.certificate_image.clone();
        let title = achievement.title.clone();
        Callback::from(move |_: MouseEvent| on_view.emit(CertificateFile::new(&source, &title)))
    };

    html! {
        <Reveal class="achievement-card">
            <div class="achievement-icon">
                <i class={format!("fas fa-{}", achievement.icon)}></i>
            </div>
            <div class="achievement-body">
                <h3>{achievement.title.clone()}</h3>
                <p class="achievement-meta">
                    {format!("{} \u{2022} {}", achievement.organization, achievement.date)}
                </p>
                <p>{achievement.description.clone()}</p>
                <button class="btn btn-secondary view-certificate" type="button" onclick={on_view}>
                    <i class="fas fa-certificate"></i>{" View Certificate"}
                </button>
            </div>
        </Reveal>
    }
}

#[derive(Properties, PartialEq)]
pub struct AchievementsProps {
    pub achievements: Rc<Vec<Achievement>>,
    pub on_view: Callback<CertificateFile>,
}

#[function_component(Achievements)]
pub fn achievements(props: &AchievementsProps) -> Html {
    html! {
        <section id="achievements" class="achievements-section">
            <h2 class="section-title">{"Achievements"}</h2>
            <div class="achievements-grid">
                { for props.achievements.iter().map(|achievement| html! {
                    <AchievementCard achievement={achievement.clone()} on_view={props.on_view.clone()} />
                }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct SkillsProps {
    pub groups: Rc<Vec<SkillGroup>>,
}

#[function_component(Skills)]
pub fn skills(props: &SkillsProps) -> Html {
    html! {
        <section id="skills" class="skills-section">
            <h2 class="section-title">{"Skills"}</h2>
            <div class="skills-grid">
                { for props.groups.iter().map(|group| html! {
                    <Reveal class="skill-category">
                        <h3>
                            <i class={format!("fas fa-{}", group.icon())}></i>
                            {format!(" {}", group.category)}
                        </h3>
                        <div class="skill-tags">
                            { for group.skills.iter().map(|skill| html! { <span class="skill-tag">{skill.clone()}</span> }) }
                        </div>
                    </Reveal>
                }) }
            </div>
        </section>
    }
}
