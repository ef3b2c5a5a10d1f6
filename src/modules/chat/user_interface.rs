use crate::modules::chat::session::ChatSession;
use crate::modules::storage::store::ChatStore;
use crate::modules::utils::io::read_line;
use crate::BOT_NAME;

/// Function to run the interactive chat loop for an authenticated session
///
/// One line in, one exchange out, until the user types 'exit' or 'quit';
/// returning ends the process, which is the only way a session ends. The
/// two quit words are handled before the lookup, so knowledge entries keyed
/// 'exit' or 'quit' are unreachable here.
pub fn run_chat_session(store: &ChatStore, session: &ChatSession) {
    println!("\n=== {} — chatting as {} ===", BOT_NAME, session.username());
    println!("Ask me anything. Type 'exit' to quit.");

    loop {
        println!();
        let input = match read_line() {
            Ok(input) => input,
            Err(e) => {
                println!("Error reading input: {}", e);
                continue;
            }
        };

        match input.trim().to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("Goodbye, {}!", session.username());
                return;
            }
            _ => {}
        }

        if let Some(exchange) = session.send(store, &input) {
            println!("{}: {}", session.username(), exchange.user_text);
            println!("{}: {}", BOT_NAME, exchange.response);
        }
    }
}
