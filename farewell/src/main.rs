use clap::Parser;
use farewell::app::FarewellCliArguments;

fn main() {
    env_logger::init();
    let args = FarewellCliArguments::parse();
    match args.op.run() {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("farewell failed: {e}");
            std::process::exit(1);
        }
    }
}
