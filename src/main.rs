use anyhow::Result;
use level_config::AppConfig;
use level_display::{BubblePositions, LevelDisplay};
use level_engine::OrientationEngine;
use level_sensor::{SensorHub, SensorInfo, SimulatedAccelerometer, SimulationParams};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Commands read from stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Calibrate,
    Pause,
    Resume,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "c" | "calibrate" => Some(Command::Calibrate),
            "p" | "pause" => Some(Command::Pause),
            "r" | "resume" => Some(Command::Resume),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Application state.
struct App {
    config: AppConfig,
    engine: OrientationEngine<SensorHub, LevelDisplay>,
    /// Whether the level is currently shown and receiving samples.
    visible: bool,
}

impl App {
    fn new(config: AppConfig, engine: OrientationEngine<SensorHub, LevelDisplay>) -> Self {
        Self {
            config,
            engine,
            visible: false,
        }
    }

    /// The level became visible: take a fresh zero reference and start
    /// listening to the sensor.
    fn resume(&mut self) {
        if self.visible {
            return;
        }
        if self.config.display.recalibrate_on_resume {
            self.engine.calibrate();
        }
        if let Err(e) = self.engine.start() {
            warn!(%e, "Bubbles will stay centered");
        }
        self.visible = true;
    }

    /// The level was hidden: stop listening to the sensor.
    fn pause(&mut self) {
        if !self.visible {
            return;
        }
        self.engine.stop();
        self.visible = false;
    }

    /// Request a new zero reference. While paused the request is kept and
    /// applied to the first reading after resume.
    fn calibrate(&self) {
        self.engine.calibrate();
        if self.visible {
            info!("Calibrating on next reading; keep the device still");
        } else {
            info!("Level is paused; calibrating on the first reading after resume");
        }
    }

    fn render(&self, positions: &BubblePositions) {
        let cells = self.config.display.tube_length;
        println!(
            "x {}   y {}   ({:.2}, {:.2})",
            positions.horizontal.render(cells),
            positions.vertical.render(cells),
            positions.horizontal.position(),
            positions.vertical.position(),
        );
    }

    /// Handle one command. Returns `false` when the app should exit.
    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Calibrate => self.calibrate(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Quit => return false,
        }
        true
    }
}

async fn run(mut app: App, mut positions_rx: watch::Receiver<BubblePositions>) -> Result<App> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    app.resume();
    app.render(&positions_rx.borrow_and_update());

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => match Command::parse(&line) {
                        Some(command) => {
                            if !app.handle(command) {
                                break;
                            }
                        }
                        None if line.trim().is_empty() => {}
                        None => println!("commands: c(alibrate) p(ause) r(esume) q(uit)"),
                    },
                    None => stdin_open = false,
                }
            }
            changed = positions_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let positions = *positions_rx.borrow_and_update();
                app.render(&positions);
            }
            _ = &mut ctrl_c => break,
        }
    }

    app.pause();
    Ok(app)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "spirit_level=info,level_engine=info,level_sensor=info,level_config=info".into()
            }),
        )
        .init();

    info!("Spirit level starting");

    let config = level_config::load_config().unwrap_or_else(|e| {
        warn!(?e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    info!(
        scale = config.display.scale,
        policy = ?config.engine.normalization,
        "Config loaded"
    );

    let sensor = &config.sensor;
    let hub = SensorHub::new(
        sensor
            .enabled
            .then(|| SensorInfo::new(sensor.name.clone(), sensor.max_range)),
    );
    let _simulator = SimulatedAccelerometer::spawn(
        hub.feeder(),
        SimulationParams {
            interval: Duration::from_millis(sensor.sample_interval_ms.max(1)),
            bias: sensor.mounting_bias,
            amplitude_deg: sensor.tilt_amplitude_deg,
            period_secs: sensor.tilt_period_secs,
        },
    );

    let (display, positions_rx) = LevelDisplay::new(config.display.scale);
    let engine = OrientationEngine::new(hub, config.engine.normalization, display);

    let app = run(App::new(config, engine), positions_rx).await?;

    if let Err(e) = level_config::save_config(&app.config) {
        error!(?e, "Failed to save config");
    }

    info!("Spirit level stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("c"), Some(Command::Calibrate));
        assert_eq!(Command::parse("  Pause \n"), Some(Command::Pause));
        assert_eq!(Command::parse("r"), Some(Command::Resume));
        assert_eq!(Command::parse("exit"), Some(Command::Quit));
        assert_eq!(Command::parse("x"), None);
    }

    #[tokio::test]
    async fn resume_recalibrates_and_pause_stops() {
        let hub = SensorHub::new(Some(SensorInfo::new("test", 10.0)));
        let (display, _rx) = LevelDisplay::new(10.0);
        let engine = OrientationEngine::new(hub, Default::default(), display);
        let mut app = App::new(AppConfig::default(), engine);

        app.resume();
        assert!(app.visible);
        assert!(app.engine.is_calibration_pending());

        assert!(app.handle(Command::Pause));
        assert!(!app.visible);
        assert!(!app.handle(Command::Quit));
    }

    #[tokio::test]
    async fn calibrate_while_paused_applies_after_resume() {
        let hub = SensorHub::new(Some(SensorInfo::new("test", 10.0)));
        let feeder = hub.feeder();
        let (display, _rx) = LevelDisplay::new(10.0);
        let engine = OrientationEngine::new(hub, Default::default(), display);
        let mut config = AppConfig::default();
        config.display.recalibrate_on_resume = false;
        let mut app = App::new(config, engine);

        assert!(app.handle(Command::Calibrate));
        assert!(!app.visible);
        assert!(app.engine.is_calibration_pending());

        app.resume();
        let reading = glam::Vec3::new(0.2, -0.1, 9.7);
        assert!(feeder.push(reading));
        tokio::time::timeout(Duration::from_secs(2), async {
            while app.engine.is_calibration_pending() {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("calibration never captured");
        assert_eq!(app.engine.calibration_offset(), reading);
    }

    #[tokio::test]
    async fn resume_without_recalibration_leaves_no_request() {
        let hub = SensorHub::new(Some(SensorInfo::new("test", 10.0)));
        let (display, _rx) = LevelDisplay::new(10.0);
        let engine = OrientationEngine::new(hub, Default::default(), display);
        let mut config = AppConfig::default();
        config.display.recalibrate_on_resume = false;
        let mut app = App::new(config, engine);

        app.resume();
        assert!(!app.engine.is_calibration_pending());
    }

    #[tokio::test]
    async fn missing_sensor_still_resumes() {
        let (display, _rx) = LevelDisplay::new(10.0);
        let engine = OrientationEngine::new(SensorHub::without_sensor(), Default::default(), display);
        let mut app = App::new(AppConfig::default(), engine);

        app.resume();
        assert!(app.visible);
        app.pause();
        assert!(!app.visible);
    }
}
