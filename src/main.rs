//! # Slide Rotator Application Entry Point
//!
//! This binary drives the site behavior from a terminal. It plays the part of the page: it
//! owns the event loop, forwards key presses and hover signals to the sliders, and renders
//! state as ASCII. Each subcommand exercises one part of the library:
//! - `run`: both sliders on real (tokio) timers, with scripted keys and hover
//! - `theme`: show or toggle the stored theme preference
//! - `gallery`: filter the gallery and open the modal
//! - `contact`: validate and simulate submitting the contact form
//! - `counter`: print the stat counter's count-up frames

// Test modules
#[cfg(test)]
mod tests;

use anyhow::{bail, Context};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use slide_rotator::bindings::{HostSignal, Key};
use slide_rotator::carousel::RotatingDisplayController;
use slide_rotator::config::{Config, SliderConfig, CONFIG_FILE};
use slide_rotator::contact::{self, ContactError, ContactForm};
use slide_rotator::counter::CounterAnimation;
use slide_rotator::gallery::{Filter, Gallery};
use slide_rotator::renderer::{draw_ascii, render_change, render_gallery};
use slide_rotator::scheduler::{Scheduler, TokioScheduler};
use slide_rotator::theme::{FileStore, ThemeManager};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "slide-rotator",
    version,
    about = "Drive the site's sliders, gallery, and forms from a terminal"
)]
struct Cli {
    /// Site configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run both sliders on real timers and print every slide change
    Run {
        /// How long to run
        #[arg(long, default_value_t = 20)]
        seconds: u64,
        /// DOM key names to replay one per second, e.g. ArrowRight,Space
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
        /// Treat the testimonials slider as fully on screen
        #[arg(long)]
        testimonials_visible: bool,
        /// Second at which the pointer enters a slider
        #[arg(long)]
        hover_at: Option<u64>,
        /// How many seconds the pointer stays over the slider
        #[arg(long, default_value_t = 3)]
        hover_for: u64,
        /// Which slider the pointer hovers
        #[arg(long, value_enum, default_value_t = Target::Hero)]
        hover_on: Target,
        /// Second at which the page is hidden (both sliders suspend)
        #[arg(long)]
        hidden_at: Option<u64>,
        /// How many seconds the page stays hidden
        #[arg(long, default_value_t = 3)]
        hidden_for: u64,
    },
    /// Show the stored theme, optionally toggling it first
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// List the gallery under a filter, optionally opening one item
    Gallery {
        /// all, personal, convoy, home, or equipment
        #[arg(long, default_value = "all")]
        filter: String,
        /// Position in the filtered grid to open in the modal
        #[arg(long)]
        open: Option<usize>,
    },
    /// Validate the contact form and simulate sending it
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Print the count-up frames for a stat counter
    Counter { target: u32 },
}

/// Slider addressed by a host signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Target {
    Hero,
    Testimonials,
    Both,
}

/// Something the scripted host does at a point in time.
#[derive(Debug)]
enum HostEvent {
    KeyPress(String),
    Signal(Target, HostSignal),
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::load_from_path(&cli.config);

    match cli.command {
        Command::Run {
            seconds,
            keys,
            testimonials_visible,
            hover_at,
            hover_for,
            hover_on,
            hidden_at,
            hidden_for,
        } => {
            let mut timeline: Vec<(Duration, HostEvent)> = keys
                .into_iter()
                .enumerate()
                .map(|(i, key)| (Duration::from_secs(i as u64 + 1), HostEvent::KeyPress(key)))
                .collect();
            if let Some(at) = hover_at {
                timeline.push((
                    Duration::from_secs(at),
                    HostEvent::Signal(hover_on, HostSignal::PointerEnter),
                ));
                timeline.push((
                    Duration::from_secs(at + hover_for),
                    HostEvent::Signal(hover_on, HostSignal::PointerLeave),
                ));
            }
            if let Some(at) = hidden_at {
                timeline.push((
                    Duration::from_secs(at),
                    HostEvent::Signal(Target::Both, HostSignal::PageHidden),
                ));
                timeline.push((
                    Duration::from_secs(at + hidden_for),
                    HostEvent::Signal(Target::Both, HostSignal::PageVisible),
                ));
            }
            timeline.sort_by_key(|(at, _)| *at);

            run_sliders(
                &config,
                Duration::from_secs(seconds),
                timeline,
                testimonials_visible,
            )
        }
        Command::Theme { toggle } => show_theme(&config, toggle),
        Command::Gallery { filter, open } => show_gallery(&filter, open),
        Command::Contact {
            name,
            email,
            phone,
            message,
        } => send_contact(ContactForm {
            name,
            email,
            phone,
            message,
        }),
        Command::Counter { target } => {
            let frames: Vec<String> = CounterAnimation::new(target)
                .map(|value| value.to_string())
                .collect();
            println!("{}", frames.join(" "));
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,slide_rotator=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Build a slider on the tokio scheduler and log its transitions to stdout.
fn build_slider(
    slider: &SliderConfig,
) -> anyhow::Result<RotatingDisplayController<TokioScheduler>> {
    let settings = slider
        .settings()
        .with_context(|| format!("invalid [{}] slider configuration", slider.name))?;
    let controller = RotatingDisplayController::new(settings, TokioScheduler)?;

    let name = slider.name.clone();
    let labels = slider.slides.clone();
    controller.on_slide_changed(move |change| {
        println!(
            "{} {}",
            Local::now().format("%-I:%M:%S%p"),
            render_change(&name, change, &labels)
        );
    });

    info!(
        slider = %slider.name,
        slides = slider.slides.len(),
        delay_ms = slider.autoplay_delay_ms,
        autoplay = slider.autoplay,
        "slider started"
    );
    Ok(controller)
}

/// Forward a hover or visibility signal to the slider(s) it concerns.
fn route_signal<S: Scheduler + 'static>(
    target: Target,
    signal: HostSignal,
    hero: &RotatingDisplayController<S>,
    testimonials: &RotatingDisplayController<S>,
) {
    if matches!(target, Target::Hero | Target::Both) {
        hero.apply(signal.command());
    }
    if matches!(target, Target::Testimonials | Target::Both) {
        testimonials.apply(signal.command());
    }
}

fn draw_slider(slider: &SliderConfig, controller: &RotatingDisplayController<TokioScheduler>) {
    draw_ascii(
        &slider.name,
        controller,
        &slider.slides,
        slider.indicators,
        Local::now(),
    );
}

fn run_sliders(
    config: &Config,
    duration: Duration,
    timeline: Vec<(Duration, HostEvent)>,
    testimonials_visible: bool,
) -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start runtime")?;
    let local = tokio::task::LocalSet::new();

    local.block_on(&rt, async {
        let hero = build_slider(&config.hero)?;
        let testimonials = build_slider(&config.testimonials)?;
        let hero_keys = config.hero.key_bindings();
        let testimonial_keys = config.testimonials.key_bindings();

        draw_slider(&config.hero, &hero);
        draw_slider(&config.testimonials, &testimonials);

        let start = tokio::time::Instant::now();
        for (at, event) in timeline.into_iter().filter(|(at, _)| *at < duration) {
            tokio::time::sleep_until(start + at).await;
            match event {
                HostEvent::KeyPress(name) => {
                    let key = Key::from_dom(&name);
                    if key == Key::Other {
                        warn!(key = %name, "ignoring unknown key");
                        continue;
                    }
                    if let Some(command) = hero_keys.resolve(key, true) {
                        debug!(key = %name, ?command, "hero key");
                        hero.apply(command);
                    }
                    if let Some(command) = testimonial_keys.resolve(key, testimonials_visible) {
                        debug!(key = %name, ?command, "testimonials key");
                        testimonials.apply(command);
                    }
                }
                HostEvent::Signal(target, signal) => {
                    debug!(?target, ?signal, "host signal");
                    route_signal(target, signal, &hero, &testimonials);
                }
            }
        }

        tokio::time::sleep_until(start + duration).await;

        draw_slider(&config.hero, &hero);
        draw_slider(&config.testimonials, &testimonials);

        // Cancel pending timers before the LocalSet is dropped
        hero.pause();
        testimonials.pause();
        Ok::<(), anyhow::Error>(())
    })
}

fn show_theme(config: &Config, toggle: bool) -> anyhow::Result<()> {
    let store = FileStore::new(&config.theme.preference_file);
    let mut manager = ThemeManager::load(store);

    if toggle {
        manager.toggle().with_context(|| {
            format!(
                "could not save theme preference to {}",
                config.theme.preference_file.display()
            )
        })?;
    }

    let theme = manager.theme();
    println!("theme: {} (icon: {})", theme.as_attr(), theme.icon());
    Ok(())
}

fn show_gallery(filter: &str, open: Option<usize>) -> anyhow::Result<()> {
    let filter: Filter = filter.parse()?;
    let mut gallery = Gallery::default();
    gallery.set_filter(filter);

    if let Some(position) = open {
        if !gallery.open(position) {
            warn!(position, %filter, "no gallery item at that position");
        }
    }

    print!("{}", render_gallery(&gallery));
    Ok(())
}

fn send_contact(form: ContactForm) -> anyhow::Result<()> {
    let remaining = contact::remaining_chars(&form.message);
    println!(
        "{} characters remaining{}",
        remaining,
        if contact::counter_is_low(&form.message) { " (!)" } else { "" }
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start runtime")?;

    println!("Sending...");
    match rt.block_on(contact::submit(&form)) {
        Ok(submission) => {
            println!("Message sent. We will contact {} shortly.", submission.email);
            Ok(())
        }
        Err(ContactError::Invalid(errors)) => {
            for error in &errors {
                eprintln!("  {}", error);
            }
            bail!("{}", ContactError::Invalid(errors))
        }
    }
}
