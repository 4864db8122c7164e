use std::{
    collections::BTreeSet,
    io::{self, Write},
    time::Duration,
};

use clap::Parser;
use page::{
    config::{AnimatorConfig, DEFAULT_CHAR_DELAY_MS, DEFAULT_THRESHOLD},
    content::DIAGRAMS,
    dispatch::{Dispatcher, PageEvent},
    modal::{ModalKind, ModalView},
    surface::{Document, PageContext, RegionId, VisibilityObserver},
};
use tokio::{sync::mpsc, time::sleep};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Scroll ratios reported for each diagram, the last one crosses the default threshold.
const SCROLL_STEPS: [f64; 4] = [0.05, 0.15, 0.25, 0.6];
const SCROLL_PAUSE: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(author, version, about = "Types the homelab diagrams out in the terminal")]
struct Args {
    #[arg(long, default_value_t = DEFAULT_CHAR_DELAY_MS)]
    char_delay_ms: u64,

    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Diagram to show, repeatable. All diagrams when omitted.
    #[arg(long = "region")]
    regions: Vec<String>,
}

/// Redraws the whole screen on every write.
struct Terminal {
    regions: BTreeSet<RegionId>,
}

impl Document for Terminal {
    fn has_region(&self, id: &RegionId) -> bool {
        self.regions.contains(id)
    }

    fn set_text(&mut self, id: &RegionId, text: &str) {
        let mut out = io::stdout().lock();

        if let Err(e) = write!(out, "\x1b[2J\x1b[H== {id} ==\n{text}").and_then(|()| out.flush()) {
            warn!("Failed to draw {id}: {e}");
        }
    }

    fn set_menu_open(&mut self, open: bool) {
        debug!(open, "Menu");
    }

    fn show_modal(&mut self, view: &ModalView) {
        debug!(title = view.title(), "Modal opened");
    }

    fn hide_modal(&mut self, kind: ModalKind) {
        debug!(?kind, "Modal closed");
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        debug!(locked, "Scroll lock");
    }
}

#[derive(Default)]
struct Viewport {
    observed: BTreeSet<RegionId>,
}

impl VisibilityObserver for Viewport {
    fn observe(&mut self, id: &RegionId) {
        self.observed.insert(id.clone());
    }

    fn unobserve(&mut self, id: &RegionId) {
        self.observed.remove(id);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();
    let config = AnimatorConfig::default()
        .with_threshold(args.threshold)
        .with_char_delay_ms(args.char_delay_ms);

    let regions: BTreeSet<RegionId> = if args.regions.is_empty() {
        DIAGRAMS.iter().map(|diagram| RegionId::new(diagram.region)).collect()
    } else {
        args.regions.iter().map(RegionId::new).collect()
    };

    let mut page = Dispatcher::new(
        PageContext::new(
            Terminal {
                regions: regions.clone(),
            },
            Viewport::default(),
        ),
        config.clone(),
    );

    for error in page.register_diagrams() {
        debug!(%error, "Diagram not shown");
    }
    for error in page.start() {
        warn!(%error, "Diagram will not animate");
    }

    let (tx, rx) = mpsc::channel(16);
    let handle = tokio::spawn(page.run(rx));

    for diagram in DIAGRAMS.iter().filter(|d| regions.contains(d.region)) {
        let id = RegionId::new(diagram.region);

        for ratio in SCROLL_STEPS {
            info!(region = %id, ratio, "Scrolling");
            tx.send(PageEvent::RegionVisible {
                id: id.clone(),
                visible: true,
                ratio,
            })
            .await?;
            sleep(SCROLL_PAUSE).await;
        }

        let chars = u32::try_from(diagram.text.chars().count())?;
        sleep(config.char_delay() * chars + SCROLL_PAUSE).await;
    }

    drop(tx);
    let page = handle.await?;

    println!();
    for id in &regions {
        println!("{id}: fired = {}", page.animator().has_fired(id));
    }

    Ok(())
}
