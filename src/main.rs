use clap::Parser;
use tseval::cli::Cli;
use tseval::run;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            eprint!("{err}");
            std::process::exit(1);
        }
        Err(err) => {
            print!("{err}");
            std::process::exit(0);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
