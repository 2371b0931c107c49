use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tabled::Tabled;
use tabled::settings::Style;
use towersim::aircraft::Cargo;
use towersim::control::tower::ControlTower;
use towersim::ground::{Gate, Terminal, TerminalKind};
use towersim::save;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Path to the saved tick counter
    #[arg(long, value_name = "FILE", default_value = "saves/ticks.txt")]
    ticks: PathBuf,
    /// Path to the saved aircraft list
    #[arg(long, value_name = "FILE", default_value = "saves/aircraft.txt")]
    aircraft: PathBuf,
    /// Path to the saved queue state
    #[arg(long, value_name = "FILE", default_value = "saves/queues.txt")]
    queues: PathBuf,
    /// Path to the saved terminal/gate layout
    #[arg(long, value_name = "FILE", default_value = "saves/terminals.txt")]
    terminals: PathBuf,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut candidates = Vec::new();

        for cmd in &self.commands {
            if cmd.starts_with(line) {
                candidates.push(Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                });
            }
        }

        Ok((0, candidates))
    }
}

fn paginate(content: String) {
    let mut pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn())
        .expect("Failed to spawn pager");

    let mut stdin = pager.stdin.take().expect("Failed to open stdin for pager");

    if let Err(e) = stdin.write_all(content.as_bytes()) {
        // Broken pipe is common if the user quits the pager early
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            eprintln!("Error writing to pager: {}", e);
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

#[derive(Tabled)]
struct AircraftRow {
    callsign: String,
    model: &'static str,
    task: String,
    #[tabled(rename = "fuel %")]
    fuel: u32,
    cargo: String,
    status: String,
}

fn aircraft_table(tower: &ControlTower) -> String {
    let rows: Vec<AircraftRow> = tower
        .aircraft()
        .iter()
        .map(|a| AircraftRow {
            callsign: a.callsign().to_string(),
            model: a.model().name(),
            task: a.tasks().current().to_string(),
            fuel: a.fuel_percent_remaining(),
            cargo: match a.cargo() {
                Cargo::Passengers(n) => format!("{} pax", n),
                Cargo::Freight(kg) => format!("{} kg", kg),
            },
            status: if a.has_emergency() {
                "EMERGENCY".red().to_string()
            } else {
                String::new()
            },
        })
        .collect();
    let mut table = tabled::Table::new(rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    table.to_string()
}

fn print_terminals(tower: &ControlTower) {
    for terminal in tower.terminals() {
        println!(
            "{} ({}% occupied)",
            terminal,
            terminal.occupancy_level()
        );
        for gate in terminal.gates() {
            println!("  {}", gate);
        }
    }
}

fn load_or_new(args: &Args) -> Result<ControlTower, Box<dyn std::error::Error>> {
    let all_present = [&args.ticks, &args.aircraft, &args.queues, &args.terminals]
        .iter()
        .all(|p| p.exists());
    if !all_present {
        println!("No save files found, starting an empty tower.");
        return Ok(ControlTower::new());
    }
    let ticks = std::fs::read_to_string(&args.ticks)?;
    let aircraft = std::fs::read_to_string(&args.aircraft)?;
    let queues = std::fs::read_to_string(&args.queues)?;
    let terminals = std::fs::read_to_string(&args.terminals)?;
    let tower = save::load_tower(&ticks, &aircraft, &queues, &terminals)?;
    println!("Loaded {}", tower);
    Ok(tower)
}

fn write_stream(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

fn save_tower(args: &Args, tower: &ControlTower) -> std::io::Result<()> {
    let snapshot = save::encode_tower(tower);
    write_stream(&args.ticks, &snapshot.ticks)?;
    write_stream(&args.aircraft, &snapshot.aircraft)?;
    write_stream(&args.queues, &snapshot.queues)?;
    write_stream(&args.terminals, &snapshot.terminals)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut tower = load_or_new(&args)?;
    println!("Tower online at tick {}.", tower.ticks_elapsed());

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: vec![
            "tick".to_string(),
            "ls".to_string(),
            "queues".to_string(),
            "terminals".to_string(),
            "emergency".to_string(),
            "clear".to_string(),
            "add-terminal".to_string(),
            "add-gate".to_string(),
            "save".to_string(),
            "help".to_string(),
            "exit".to_string(),
        ],
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "tick" => {
                        let n = parts
                            .get(1)
                            .and_then(|s| s.parse::<u64>().ok())
                            .unwrap_or(1);
                        for _ in 0..n {
                            tower.tick();
                        }
                        println!("Tick {}. {}", tower.ticks_elapsed(), tower);
                    }
                    "ls" => {
                        if tower.aircraft().is_empty() {
                            println!("No aircraft registered.");
                        } else {
                            let table = aircraft_table(&tower);
                            if tower.aircraft().len() > 20 {
                                paginate(table);
                            } else {
                                println!("{}", table);
                            }
                        }
                    }
                    "queues" => {
                        println!("{}", tower.takeoff_queue());
                        println!("{}", tower.landing_queue().describe(tower.aircraft()));
                        println!("LoadingAircraft {:?}", tower.loading_aircraft());
                    }
                    "terminals" => {
                        if tower.terminals().is_empty() {
                            println!("No terminals registered.");
                        } else {
                            print_terminals(&tower);
                        }
                    }
                    "emergency" | "clear" => {
                        let declare = parts[0] == "emergency";
                        if let Some(id) = parts.get(1) {
                            if let Some(aircraft) = tower.find_aircraft_mut(id) {
                                if declare {
                                    aircraft.declare_emergency();
                                } else {
                                    aircraft.clear_emergency();
                                }
                                println!("{}", aircraft);
                            } else if let Some(terminal) = id
                                .parse::<u32>()
                                .ok()
                                .and_then(|n| tower.find_terminal_mut(n))
                            {
                                if declare {
                                    terminal.declare_emergency();
                                } else {
                                    terminal.clear_emergency();
                                }
                                println!("{}", terminal);
                            } else {
                                println!("No aircraft or terminal matching '{}'.", id);
                            }
                        } else {
                            println!("Usage: {} <callsign | terminal number>", parts[0]);
                        }
                    }
                    "add-terminal" => {
                        match (
                            parts.get(1).and_then(|k| match *k {
                                "airplane" => Some(TerminalKind::Airplane),
                                "helicopter" => Some(TerminalKind::Helicopter),
                                _ => None,
                            }),
                            parts.get(2).and_then(|n| n.parse::<u32>().ok()),
                        ) {
                            (Some(kind), Some(number)) => {
                                tower.add_terminal(Terminal::new(kind, number));
                                println!("Added {} {}.", kind.name(), number);
                            }
                            _ => println!("Usage: add-terminal <airplane|helicopter> <number>"),
                        }
                    }
                    "add-gate" => {
                        match (
                            parts.get(1).and_then(|n| n.parse::<u32>().ok()),
                            parts.get(2).and_then(|n| n.parse::<u32>().ok()),
                        ) {
                            (Some(terminal_number), Some(gate_number)) => {
                                match tower.find_terminal_mut(terminal_number) {
                                    Some(terminal) => {
                                        match terminal.add_gate(Gate::new(gate_number)) {
                                            Ok(()) => println!("Added gate {}.", gate_number),
                                            Err(e) => println!("{}", e),
                                        }
                                    }
                                    None => println!("No terminal {}.", terminal_number),
                                }
                            }
                            _ => println!("Usage: add-gate <terminal number> <gate number>"),
                        }
                    }
                    "save" => match save_tower(&args, &tower) {
                        Ok(()) => println!("Saved at tick {}.", tower.ticks_elapsed()),
                        Err(e) => println!("Save failed: {}", e),
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  tick [n]                  - Advance the simulation by n ticks (default 1)");
                        println!("  ls                        - List all aircraft in a table");
                        println!("  queues                    - Show the takeoff/landing queues and loading aircraft");
                        println!("  terminals                 - Show terminals and their gates");
                        println!("  emergency <id>            - Declare an emergency on an aircraft or terminal");
                        println!("  clear <id>                - Clear an emergency on an aircraft or terminal");
                        println!("  add-terminal <kind> <n>   - Register a new airplane/helicopter terminal");
                        println!("  add-gate <terminal> <n>   - Add a gate to a terminal");
                        println!("  save                      - Write the four save streams back to disk");
                        println!("  help / ?                  - Show this help menu");
                        println!("  exit / quit               - Exit the simulator\n");
                    }
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
