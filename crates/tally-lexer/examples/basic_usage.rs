use tally_lexer::{LexError, Lexer};

fn main() {
    // Example 1: Well-formed expression
    println!("=== Example 1: Simple expression ===");
    let mut lexer = Lexer::new("10 + 5 - 3");
    match lexer.tokenize() {
        Ok(tokens) => {
            for token in &tokens {
                println!("{:?} at {}..{}", token.value, token.span.start, token.span.end);
            }
        }
        Err(e) => println!("error: {}", e),
    }

    // Example 2: The lexer does not check grammar
    println!("\n=== Example 2: Adjacent numbers ===");
    match Lexer::new("3 3 + +").lex() {
        Ok(tokens) => println!("{:?}", tokens),
        Err(e) => println!("error: {}", e),
    }

    // Example 3: Invalid characters
    println!("\n=== Example 3: Invalid character ===");
    match Lexer::new("1 + 2 * 3").lex() {
        Ok(tokens) => println!("{:?}", tokens),
        Err(LexError::InvalidCharacter(ch, index)) => {
            println!("invalid character {:?} at index {}", ch, index)
        }
        Err(e) => println!("error: {}", e),
    }
}
