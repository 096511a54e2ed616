use std::{env, fs::read_to_string, process};

use matcha::{codegen::Target, compile};

fn main() {
    stderrlog::new()
        .module(module_path!())
        .verbosity(2)
        .init()
        .unwrap();

    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("usage: matcha <file> <js|java>");
        process::exit(1);
    }

    let target: Target = match args[2].parse() {
        Ok(target) => target,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        }
    };

    let source = read_to_string(&args[1]).expect("Failed to read file!");

    match compile(&source, target) {
        Ok(output) => println!("{}", output),
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}
