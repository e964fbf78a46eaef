use myshell::config::Config;
use myshell::io_adapters::StdoutSink;
use myshell::line_source::EditorSource;
use myshell::signals::SignalGuard;
use myshell::{Interpreter, Session};

fn run(config: &Config) -> anyhow::Result<()> {
    let _signals = SignalGuard::install(StdoutSink)?;

    let interpreter = Interpreter::default();
    let mut source = EditorSource::new(interpreter.registry().names(), config)?;
    let mut session = Session::new(interpreter, config.color_enabled());
    session.run(&mut source)
}

fn main() {
    let config: Config = argh::from_env();
    if config.version {
        println!("myshell {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(&config) {
        eprintln!("myshell: {e:#}");
        std::process::exit(1);
    }
    std::process::exit(0);
}
