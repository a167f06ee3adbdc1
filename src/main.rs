use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use scavenger_hunt::config::DEFAULT_CONFIG_FILE;
use scavenger_hunt::store::GlobalStats;
use scavenger_hunt::{
    AnonymousAuthenticator, Authenticator, Catalog, Config, GameSession, JsonFileStore, LogNotifier,
    PlayerIdentity, ProgressStore, Screen, SubmitOutcome,
};

const HELP: &str = "Commands: map, go <n>, hint, back, board, swap <a> <b>, shuffle, solve, \
stats, reset, :q (quit). Anything else on a mission is taken as your answer.";

enum Flow {
    Continue,
    Quit,
}

struct App<'a> {
    session: GameSession<'a, JsonFileStore, LogNotifier>,
    auth: AnonymousAuthenticator,
}

impl<'a> App<'a> {
    fn new(catalog: &'a Catalog, store: JsonFileStore) -> Self {
        App {
            session: GameSession::new(catalog, store, LogNotifier),
            auth: AnonymousAuthenticator::new(),
        }
    }

    fn register(&mut self, input: &mut impl BufRead) -> Result<Flow> {
        loop {
            let Some(name) = prompt(input, "Pseudo: ")? else {
                return Ok(Flow::Quit);
            };
            let Some(email) = prompt(input, "Email: ")? else {
                return Ok(Flow::Quit);
            };

            let identity = match PlayerIdentity::new(&name, &email) {
                Ok(identity) => identity,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };
            let token = self.auth.authenticate()?;
            match self.session.register_or_load(token, identity) {
                Ok(state) => {
                    println!(
                        "Bienvenue {} ! {}/5 missions terminées.",
                        state.player().display_name(),
                        state.completed_count()
                    );
                    self.print_map();
                    return Ok(Flow::Continue);
                }
                Err(e) => println!("Impossible de charger ta partie: {}", e),
            }
        }
    }

    fn handle(&mut self, line: &str) -> Flow {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let args: Vec<&str> = words.collect();

        match (command, args.as_slice()) {
            (":q", []) | (":quit", []) => return Flow::Quit,
            ("help", []) | (":help", []) => println!("{}", HELP),
            ("map", []) => self.print_map(),
            ("stats", []) => self.print_stats(),
            ("reset", []) => {
                self.session.reset();
                println!("Partie réinitialisée.");
            }
            ("go", [n]) => match n.parse::<u8>() {
                Ok(id) => self.select(id),
                Err(_) => println!("Usage: go <1-5>"),
            },
            ("hint", []) => match self.session.show_next_hint() {
                Ok(hint) => println!("INDICE: {}", hint),
                Err(e) => println!("{}", e),
            },
            ("back", []) => match self.session.back() {
                Ok(()) => self.print_map(),
                Err(e) => println!("{}", e),
            },
            ("board", []) => self.print_board(),
            ("swap", [a, b]) => match (a.parse::<u8>(), b.parse::<u8>()) {
                (Ok(a), Ok(b)) => match self.session.swap_pieces(a, b) {
                    Ok(true) => self.print_board(),
                    Ok(false) => println!("Échange impossible."),
                    Err(e) => println!("{}", e),
                },
                _ => println!("Usage: swap <slot> <slot>"),
            },
            ("shuffle", []) => match self.session.shuffle_jigsaw() {
                Ok(()) => self.print_board(),
                Err(e) => println!("{}", e),
            },
            ("solve", []) => match self.session.solve_jigsaw() {
                Ok(()) => self.print_board(),
                Err(e) => println!("{}", e),
            },
            _ if self.session.state().screen() == Screen::Mission => self.submit(line),
            _ => println!("Commande inconnue. {}", HELP),
        }
        Flow::Continue
    }

    fn select(&mut self, id: u8) {
        let mission = match self.session.select(id) {
            Ok(mission) => mission,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };

        println!("\n== {} ({}) ==", mission.meta.name, mission.location.name);
        if let Some(url) = &mission.location.maps_url {
            println!("Itinéraire: {}", url);
        }
        println!("{}", mission.narrative.description);
        if let Some(story) = &mission.narrative.story {
            println!("\n{}", story);
        }
        for (i, clue) in mission.narrative.clues.iter().enumerate() {
            println!("QR {}: {}", i + 1, clue);
        }
        for hint in self.session.visible_hints() {
            println!("INDICE: {}", hint);
        }
        if mission.is_puzzle() {
            self.print_board();
        }
    }

    fn submit(&mut self, answer: &str) {
        match self.session.submit(answer) {
            Ok(SubmitOutcome::Correct { all_complete, .. }) => {
                println!("Bravo ! Tu as résolu l'énigme !");
                if all_complete {
                    println!("\n*** Toutes les missions sont terminées. Félicitations ! ***");
                }
                self.print_map();
            }
            Ok(SubmitOutcome::Incorrect { revealed_hint, .. }) => {
                println!("Ce n'est pas la bonne réponse. Réessaie !");
                if let (Some(i), Some(mission)) = (revealed_hint, self.session.current_mission()) {
                    println!("INDICE: {}", mission.hints()[i]);
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    fn print_map(&self) {
        println!();
        for entry in self.session.map() {
            let mark = if entry.completed {
                "[x]"
            } else if entry.unlocked {
                "[ ]"
            } else {
                "[-]"
            };
            println!(
                "{} {}. {} ({})",
                mark,
                entry.mission.id(),
                entry.mission.meta.name,
                entry.mission.location.name
            );
        }
        let state = self.session.state();
        println!("{}/{} missions", state.completed_count(), self.session.catalog().len());
    }

    fn print_board(&self) {
        let Some(jigsaw) = self.session.jigsaw() else {
            println!("Pas de puzzle ici.");
            return;
        };
        for row in jigsaw.arrangement().chunks(4) {
            let cells: Vec<String> = row
                .iter()
                .map(|p| format!("{:>2}:{:<2}", p.current_slot, p.display_number))
                .collect();
            println!("{}", cells.join("  "));
        }
        if jigsaw.is_solved() {
            println!("Puzzle assemblé ! Trouve maintenant le code.");
        } else {
            println!("{} pièces mal placées.", jigsaw.misplaced());
        }
    }

    fn print_stats(&self) {
        match self.session.store().records() {
            Ok(records) => {
                let stats = GlobalStats::from_records(&records);
                println!(
                    "Joueurs: {}  Parties terminées: {}  Tentatives moyennes: {:.1}",
                    stats.total_players, stats.completed_games, stats.average_attempts
                );
                for m in stats.popular_missions {
                    println!("  mission {}: {} tentatives", m.mission_id, m.attempts);
                }
            }
            Err(e) => println!("Statistiques indisponibles: {}", e),
        }
    }
}

fn prompt(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    // Only the line ending goes: answers are submitted exactly as typed
    Ok(Some(strip_line_ending(&line).to_string()))
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = Config::load_or_default(&config_path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let catalog = config.catalog()?;
    let store = JsonFileStore::open(&config.store_dir)?;
    let mut app = App::new(&catalog, store);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("=== Chasse au trésor ===  ({})", HELP);
    if let Flow::Quit = app.register(&mut input)? {
        return Ok(());
    }

    loop {
        if app.session.state().screen() == Screen::Home {
            if let Flow::Quit = app.register(&mut input)? {
                break;
            }
            continue;
        }

        let Some(line) = prompt(&mut input, "> ")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        if let Flow::Quit = app.handle(&line) {
            break;
        }
    }

    Ok(())
}
