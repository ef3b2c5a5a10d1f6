use clap::{Arg, Command}; // Command-line argument parsing for the storage and knowledge paths
use std::process;

use chatterbot::auth::user_interface::main_auth_flow;
use chatterbot::chat::user_interface::run_chat_session;
use chatterbot::chat::ChatSession;
use chatterbot::knowledge::KnowledgeBase;
use chatterbot::storage::{ChatStore, DuplicatePolicy};
use chatterbot::utils::logging::initialize_logging;
use chatterbot::{DEFAULT_DATABASE_FILE, DEFAULT_KNOWLEDGE_FILE};

fn main() {
    // Define the command-line interface using clap
    let matches = Command::new("chatterbot")
        .about("A terminal chat assistant with user accounts")
        .arg(
            Arg::new("database")
                .long("database")
                .help("Path to the SQLite database file")
                .value_name("PATH")
                .default_value(DEFAULT_DATABASE_FILE),
        )
        .arg(
            Arg::new("knowledge")
                .long("knowledge")
                .help("Path to the question/answer CSV file")
                .value_name("PATH")
                .default_value(DEFAULT_KNOWLEDGE_FILE),
        )
        .arg(
            Arg::new("on-duplicate")
                .long("on-duplicate")
                .help("What a signup with an existing username does: reject or overwrite")
                .value_name("POLICY")
                .default_value("reject"),
        )
        .get_matches();

    if let Err(e) = initialize_logging() {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    // All three arguments carry defaults, so they are always present
    let database = matches.get_one::<String>("database").unwrap();
    let knowledge_path = matches.get_one::<String>("knowledge").unwrap();
    let policy = match matches
        .get_one::<String>("on-duplicate")
        .unwrap()
        .parse::<DuplicatePolicy>()
    {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    // Open the store and make sure the schema exists before showing the menu
    let store = ChatStore::new(database, policy);
    if let Err(e) = store.initialize() {
        log::error!("Failed to open database {}: {}", database, e);
        eprintln!("Failed to open database {}: {}", database, e);
        process::exit(1);
    }

    // Run the auth workflow; None means the user chose to exit at the menu
    if let Some(username) = main_auth_flow(&store) {
        // A fresh knowledge load per login; a missing or malformed file is
        // fatal since the session has nothing to answer from
        let knowledge = match KnowledgeBase::load(knowledge_path) {
            Ok(knowledge) => knowledge,
            Err(e) => {
                log::error!("Failed to load knowledge file {}: {}", knowledge_path, e);
                eprintln!("Failed to load knowledge file {}: {}", knowledge_path, e);
                process::exit(1);
            }
        };
        log::info!(
            "Loaded {} knowledge entries from {}",
            knowledge.len(),
            knowledge_path
        );

        let session = ChatSession::new(username, knowledge);
        run_chat_session(&store, &session);
    }
}
