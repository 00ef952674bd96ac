//! Hash command implementation.

use tekimax_canonical::hash_content;

use super::read_input;

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let content = read_input(input)?;
    println!("{}", hash_content(&content));
    Ok(())
}
