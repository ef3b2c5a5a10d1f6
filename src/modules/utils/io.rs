use std::io;

/// Helper function to read a line from stdin
pub fn read_line() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Helper function to print a label and read the answer
pub fn prompt(label: &str) -> io::Result<String> {
    println!("{}", label);
    read_line()
}
