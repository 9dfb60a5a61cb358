use std::{env, fs, path::PathBuf};

use thyme_lexer::Lexer;
use thyme_parser::parse;
use thyme_emitter::compile;

fn print_help() {
    println!("Thyme compiler (BASIC-to-C)\n");
    println!("Commands:");
    println!("  build <file.thyme>   Compile a Thyme program to C");
    println!("  lex   <file.thyme>   Dump tokens from a .thyme file (debug)\n");
    println!("Options for build:");
    println!("  -o <out.c>           Output path (default: input path with a .c extension)");
    println!("  --stdout             Print the generated C instead of writing a file");
    println!("  --quiet              Less output\n");
    println!("Usage:");
    println!("  thymec build demos/average.thyme");
    println!("  thymec build demos/fib.thyme -o fib.c");
    println!("  thymec lex demos/fib.thyme");
}

fn cmd_build(mut args: Vec<String>) {
    if args.is_empty() {
        eprintln!("usage: thymec build <file.thyme> [-o <out.c>] [--stdout] [--quiet]");
        std::process::exit(2);
    }
    let input = args.remove(0);

    let mut out_path: Option<PathBuf> = None;
    let mut to_stdout = false;
    let mut quiet = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" => { i += 1; out_path = args.get(i).map(PathBuf::from); i += 1; }
            "--stdout" => { to_stdout = true; i += 1; }
            "--quiet" => { quiet = true; i += 1; }
            other => { eprintln!("warning: unknown option '{}' (ignored)", other); i += 1; }
        }
    }

    let src = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => { eprintln!("error: {}", e); std::process::exit(1); }
    };

    // The output file is only touched after the whole pipeline succeeds
    let ast = match parse(&src) {
        Ok(p) => p,
        Err(e) => { eprintln!("error: {}", e); std::process::exit(1); }
    };
    let c_source = match compile(&ast) {
        Ok(c) => c,
        Err(e) => { eprintln!("error: {}", e); std::process::exit(1); }
    };

    if to_stdout {
        print!("{}", c_source);
        return;
    }

    let out = out_path.unwrap_or_else(|| PathBuf::from(&input).with_extension("c"));
    if let Err(e) = fs::write(&out, &c_source) {
        eprintln!("error: failed to write {}: {}", out.display(), e);
        std::process::exit(1);
    }
    if !quiet {
        println!("wrote {}", out.display());
    }
}

fn cmd_lex(path: Option<String>) {
    let Some(path) = path else {
        eprintln!("usage: thymec lex <file.thyme>");
        std::process::exit(2)
    };
    let src = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => { eprintln!("error: {}", e); std::process::exit(1); }
    };
    let mut lx = Lexer::new(&src);
    match lx.tokenize() {
        Ok(toks) => {
            for t in toks {
                println!("{:?}\t'{}'\t@{}..{}", t.kind, t.lexeme, t.span.start, t.span.end);
            }
        }
        Err(e) => { eprintln!("lex error: {}", e); std::process::exit(1); }
    }
}

fn main() {
    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() || args[0] == "--help" || args[0] == "-h" {
        print_help();
        return;
    }
    let cmd = args.remove(0);

    match cmd.as_str() {
        "build" => cmd_build(args),
        "lex" => cmd_lex(args.first().cloned()),
        other => {
            eprintln!("unknown command: '{}'\n", other);
            print_help();
            std::process::exit(2);
        }
    }
}
