fn main() {
    use clap::Parser;
    use std::error::Error;
    let args = versescrape::cli::Args::parse();
    versescrape::cli::init_tracing(args.verbose);
    if let Err(e) = versescrape::cli::run(&args) {
        eprintln!("{}", e);
        if args.verbose {
            let mut source = e.source();
            while let Some(s) = source {
                eprintln!("  cause: {}", s);
                source = s.source();
            }
        }
        std::process::exit(e.exit_code());
    }
}
