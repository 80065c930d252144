use clap::Parser;

use assay_eval::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = Args::parse();

	assay_eval::run(args).await
}
