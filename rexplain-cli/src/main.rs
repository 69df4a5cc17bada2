use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use rexplain_core::{
    Block, Explanation, Fragment, FragmentKind, PatternInput, blocks_from_json, explain,
    explain_flags, explain_input, find_matches, format_blocks,
};

#[derive(Parser)]
#[command(name = "rexplain")]
#[command(about = "Rexplain - explain regular expressions in plain language")]
#[command(version)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explain a pattern, given bare or as /pattern/flags
    Explain {
        /// The regex pattern
        pattern: String,
        /// Flags, used when the pattern is not in /pattern/flags form
        #[arg(short, long, default_value = "")]
        flags: String,
        /// Print the explanation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Explain a flag string
    Flags {
        /// The flags, e.g. gi
        flags: String,
    },
    /// Build a pattern from a JSON block document
    Build {
        /// Path to the block document
        file: String,
        /// Also explain the built pattern
        #[arg(short, long)]
        explain: bool,
    },
    /// Test a pattern against input
    Test {
        /// The regex pattern, given bare or as /pattern/flags
        pattern: String,
        /// The input string to test
        input: String,
        /// Flags, used when the pattern is not in /pattern/flags form
        #[arg(short, long, default_value = "")]
        flags: String,
    },
    /// List the available building blocks
    Blocks,
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Explain {
            pattern,
            flags,
            json,
        } => cmd_explain(&pattern, &flags, json),
        Commands::Flags { flags } => cmd_flags(&flags),
        Commands::Build { file, explain } => cmd_build(&file, explain),
        Commands::Test {
            pattern,
            input,
            flags,
        } => cmd_test(&pattern, &input, &flags),
        Commands::Blocks => cmd_blocks(),
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(1);
}

fn paint(fragment: &Fragment) -> ColoredString {
    let text = fragment.source_text.as_str();
    if fragment.kind.is_container() {
        return text.magenta().bold();
    }
    match fragment.kind {
        FragmentKind::Literal => text.green(),
        FragmentKind::CharacterSet | FragmentKind::Escape | FragmentKind::AnyCharacter => {
            text.cyan()
        }
        FragmentKind::Quantifier => text.yellow(),
        FragmentKind::Group | FragmentKind::Lookaround => text.magenta(),
        FragmentKind::Anchor | FragmentKind::Alternation => text.blue().bold(),
        FragmentKind::Flag => text.yellow().bold(),
    }
}

fn print_fragments(fragments: &[Fragment]) {
    for fragment in fragments {
        let indent = "  ".repeat(fragment.depth + 1);
        println!("{}{}", indent, paint(fragment));
        println!("{}  {}", indent, fragment.explanation);
    }
}

fn print_explanation(explanation: &Explanation) {
    println!("{}", "This regular expression:".bold());
    println!("  {}", explanation.literal().cyan());
    println!();

    if explanation.fragments.is_empty() {
        println!("{}", "No pattern to explain".dimmed());
        return;
    }

    println!("{}", "Matches:".bold());
    print_fragments(&explanation.fragments);

    if !explanation.flag_fragments.is_empty() {
        println!();
        println!("{}", "Flags:".bold());
        print_fragments(&explanation.flag_fragments);
    }
}

fn cmd_explain(pattern: &str, flags: &str, json: bool) {
    let explanation = explain_input(pattern, flags).unwrap_or_else(|e| fail(e));

    if json {
        match serde_json::to_string_pretty(&explanation) {
            Ok(output) => println!("{}", output),
            Err(e) => fail(e),
        }
    } else {
        print_explanation(&explanation);
    }
}

fn cmd_flags(flags: &str) {
    let fragments = explain_flags(flags);

    if fragments.is_empty() {
        println!("{}", "No flags".dimmed());
    } else {
        println!("{}", "Flags:".bold());
        print_fragments(&fragments);
    }
}

fn cmd_build(file: &str, show_explanation: bool) {
    let document = std::fs::read_to_string(file).unwrap_or_else(|e| fail(e));
    let blocks = blocks_from_json(&document).unwrap_or_else(|e| fail(e));
    let pattern = format_blocks(&blocks);

    println!("{}", "Pattern:".bold());
    println!("  {}", pattern.green());

    if show_explanation {
        println!();
        let explanation = explain(&pattern, "").unwrap_or_else(|e| fail(e));
        print_explanation(&explanation);
    }
}

fn cmd_test(pattern: &str, input: &str, flags: &str) {
    let PatternInput { pattern, flags } = PatternInput::parse(pattern, flags);

    println!("{}", "Testing pattern...".bold());
    println!("  Pattern: {}", format!("/{}/{}", pattern, flags).cyan());
    println!("  Input:   {}", input.yellow());
    println!();

    let matches = find_matches(&pattern, &flags, input).unwrap_or_else(|e| fail(e));

    if matches.is_empty() {
        println!("{}", "✗ No match".red());
        return;
    }

    println!(
        "{} {}",
        "Found".bold(),
        format!("{} match(es)", matches.len()).green()
    );
    println!();

    for (i, m) in matches.iter().enumerate() {
        println!("  [{}] {}..{} = {}", i + 1, m.start, m.end, m.text.green());
        for (idx, group) in m.groups.iter().enumerate() {
            match group {
                Some(text) => println!("      Group {}: {}", idx + 1, text.green()),
                None => println!("      Group {}: {}", idx + 1, "undefined".dimmed()),
            }
        }
    }
}

fn cmd_blocks() {
    println!("{}", "Available blocks:".bold());
    for block in Block::palette() {
        println!(
            "  {:<22} {:<20} {:<10} {}",
            block.kind_name().cyan(),
            block.label(),
            block.to_pattern().green(),
            block.description().dimmed()
        );
    }
}
