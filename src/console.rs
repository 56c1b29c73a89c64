//! Console front end: adapters for the map widget and the session view, plus
//! the stdin command loop driving the controller.

use std::io::{self, BufRead, Write as _};

use anyhow::Result;
use waymark::location::StaticLocationProvider;
use waymark::session::FormInput;
use waymark::storage::FileStorage;
use waymark::workouts::WorkoutDetails;
use waymark::{LatLng, MapWidget, SessionController, SessionView, WorkoutKind};

/// Map widget that narrates map operations to the terminal.
pub struct ConsoleMapWidget;

impl MapWidget for ConsoleMapWidget {
    fn init_view(&mut self, center: LatLng, zoom: u8) {
        println!("[map] view centered at {center} (zoom {zoom})");
    }

    fn add_marker(&mut self, at: LatLng, popup_text: &str, style_class: &str) {
        println!("[map] marker at {at}: {popup_text} ({style_class})");
    }

    fn fly_to(&mut self, center: LatLng, zoom: u8) {
        println!("[map] flying to {center} (zoom {zoom})");
    }
}

/// Session view that prints list entries and notices.
pub struct ConsoleView;

impl SessionView for ConsoleView {
    fn render_entry(&mut self, workout: &waymark::Workout) {
        let metric = match workout.details {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => format!("{pace_min_per_km:.1} min/km"),
            WorkoutDetails::Cycling {
                speed_km_per_h, ..
            } => format!("{speed_km_per_h:.1} km/h"),
        };
        println!(
            "[list] {} — {:.1} km in {:.0} min, {metric}",
            workout.description, workout.distance_km, workout.duration_min
        );
    }

    fn show_form(&mut self) {
        println!("[form] open: `run <km> <min> <spm>` or `ride <km> <min> <m>`");
    }

    fn hide_form(&mut self) {
        println!("[form] closed");
    }

    fn toggle_kind_fields(&mut self) {
        println!("[form] cadence/elevation row toggled");
    }

    fn show_notice(&mut self, message: &str) {
        println!("! {message}");
    }
}

/// Parse a numeric field the way a form input behaves: blank or garbage
/// becomes NaN and is left to validation.
fn field(token: Option<&str>) -> f64 {
    token.and_then(|t| t.parse().ok()).unwrap_or(f64::NAN)
}

/// Run the interactive session loop until `quit` or EOF.
pub fn run(
    mut controller: SessionController<ConsoleMapWidget, FileStorage, ConsoleView>,
    mut provider: StaticLocationProvider,
) -> Result<()> {
    // Map clicks travel through the gateway's single click handler into a
    // channel drained by this loop, the session's one consumer thread.
    let (click_tx, click_rx) = crossbeam::channel::unbounded::<LatLng>();
    controller.map_mut().on_click(Box::new(move |at| {
        let _ = click_tx.send(at);
    }));

    controller.bootstrap(&mut provider);

    println!("commands: click <lat> <lng> | type | run <km> <min> <spm> | ride <km> <min> <m> | list | goto <n> | reset | quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("click") => {
                let lat = field(tokens.next());
                let lng = field(tokens.next());
                if lat.is_finite() && lng.is_finite() {
                    controller.map_mut().dispatch_click(LatLng::new(lat, lng));
                } else {
                    println!("usage: click <lat> <lng>");
                }
                while let Ok(at) = click_rx.try_recv() {
                    controller.handle_map_click(at);
                }
            }
            Some("type") => controller.handle_kind_change(),
            Some(cmd @ ("run" | "ride")) => {
                let kind = if cmd == "run" {
                    WorkoutKind::Running
                } else {
                    WorkoutKind::Cycling
                };
                let distance_km = field(tokens.next());
                let duration_min = field(tokens.next());
                let extra = field(tokens.next());
                let input = FormInput {
                    kind,
                    distance_km,
                    duration_min,
                    cadence_spm: if cmd == "run" { extra } else { f64::NAN },
                    elevation_gain_m: if cmd == "ride" { extra } else { f64::NAN },
                };
                // Rejections already surfaced through the view.
                let _ = controller.handle_submit(input);
            }
            Some("list") => {
                if controller.workouts().is_empty() {
                    println!("no workouts recorded");
                }
                for (i, workout) in controller.workouts().iter().enumerate() {
                    println!("{:>3}  {}", i + 1, workout.description);
                }
            }
            Some("goto") => {
                let index: usize = tokens.next().and_then(|t| t.parse().ok()).unwrap_or(0);
                match index
                    .checked_sub(1)
                    .and_then(|i| controller.workouts().get(i))
                    .map(|w| w.id)
                {
                    Some(id) => controller.handle_entry_click(id),
                    None => println!("usage: goto <n> (see `list`)"),
                }
            }
            Some("reset") => {
                controller.reset();
                controller.bootstrap(&mut provider);
            }
            Some("quit") | Some("exit") => break,
            Some(other) => println!("unknown command: {other}"),
            None => {}
        }
    }

    Ok(())
}
