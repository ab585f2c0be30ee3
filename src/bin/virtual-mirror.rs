use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use virtual_mirror::{
    Config, FsStore, ImageRef, ResultEntry, ResultPage, SessionRelay, SimulatedBackend,
    TryOnRequest, TryOnSelection,
};

#[derive(Parser, Debug)]
#[command(name = "virtual-mirror", version)]
struct Cli {
    /// JSON config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the relay state directory.
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Override the share link origin.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override the simulated processing delay.
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Override the asset root for exports.
    #[arg(long, global = true)]
    asset_root: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print how a person/cloth pair would be shown.
    Resolve(PairArgs),
    /// Put a pair in the relay slot for the result page.
    Store(PairArgs),
    /// Enter the result page: consume the relay slot and resolve it.
    Take,
    /// Try on a shop product: simulate processing, then hand off to the result page.
    TryOn(TryOnArgs),
    /// Share link helpers.
    #[command(subcommand)]
    Link(LinkCommand),
    /// List products and sample images.
    Catalog,
    /// Write the resolved result as a PNG ("Download Result").
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct PairArgs {
    /// Person image reference.
    #[arg(long)]
    person: String,

    /// Cloth image reference.
    #[arg(long)]
    cloth: String,
}

#[derive(Parser, Debug)]
struct TryOnArgs {
    /// Product id from the catalog.
    #[arg(long)]
    product: u32,

    /// Person image reference.
    #[arg(long)]
    person: String,
}

#[derive(Subcommand, Debug)]
enum LinkCommand {
    /// Build a share link for a pair.
    Encode(PairArgs),
    /// Decode a share link back into sample references.
    Decode {
        /// Full share URL.
        url: String,
    },
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    pair: PairArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = load_config(&cli)?;
    match cli.cmd {
        Command::Resolve(args) => cmd_resolve(args),
        Command::Store(args) => cmd_store(&cfg, args),
        Command::Take => cmd_take(&cfg),
        Command::TryOn(args) => cmd_try_on(&cfg, args),
        Command::Link(LinkCommand::Encode(args)) => cmd_link_encode(&cfg, args),
        Command::Link(LinkCommand::Decode { url }) => cmd_link_decode(&url),
        Command::Catalog => cmd_catalog(),
        Command::Export(args) => cmd_export(&cfg, args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => Config::default(),
    };

    if let Some(dir) = &cli.state_dir {
        cfg.state_dir = dir.clone();
    }
    if let Some(url) = &cli.base_url {
        cfg.base_url = url.clone();
    }
    if let Some(ms) = cli.delay_ms {
        cfg.processing_delay_ms = ms;
    }
    if let Some(root) = &cli.asset_root {
        cfg.asset_root = root.clone();
    }

    cfg.validate()?;
    Ok(cfg)
}

fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    let cfg = Config::load(path)
        .with_context(|| format!("load config '{}'", path.display()))?;
    Ok(cfg)
}

fn relay(cfg: &Config) -> SessionRelay<FsStore> {
    SessionRelay::new(FsStore::new(&cfg.state_dir))
}

fn pair_request(args: &PairArgs) -> TryOnRequest {
    TryOnRequest::new(args.person.as_str(), args.cloth.as_str())
}

fn cmd_resolve(args: PairArgs) -> anyhow::Result<()> {
    let person = ImageRef::new(args.person);
    let cloth = ImageRef::new(args.cloth);
    let resolved = virtual_mirror::resolve(Some(&person), Some(&cloth));
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

fn cmd_store(cfg: &Config, args: PairArgs) -> anyhow::Result<()> {
    relay(cfg)
        .store(&pair_request(&args))
        .context("store try-on request")?;
    eprintln!("stored try-on request in {}", cfg.state_dir.display());
    Ok(())
}

fn cmd_take(cfg: &Config) -> anyhow::Result<()> {
    let mut slot = relay(cfg);
    let entry = ResultPage::enter(&mut slot).context("read relay")?;
    match entry {
        ResultEntry::Show(view) => {
            println!("{}", serde_json::to_string_pretty(&view.resolved)?);
            match view.share_link(&cfg.base_url) {
                Some(link) => eprintln!("share: {link}"),
                None => eprintln!("share: not available for uploaded photos"),
            }
        }
        ResultEntry::Redirect(route) => {
            eprintln!("no pending try-on; redirect to {}", route.path())
        }
    }
    Ok(())
}

fn cmd_try_on(cfg: &Config, args: TryOnArgs) -> anyhow::Result<()> {
    let Some(product) = virtual_mirror::catalog::product(args.product) else {
        anyhow::bail!("unknown product {}", args.product);
    };

    let mut selection = TryOnSelection::for_product(product.clone());
    selection.choose_person(args.person);

    eprintln!("Generating your virtual try-on...");
    let mut backend = SimulatedBackend::new(cfg.processing_delay());
    let route = selection
        .submit(&mut backend, &mut relay(cfg))
        .context("submit try-on")?;

    match route {
        Some(route) => eprintln!("{} ready; continue to {}", product.name, route.path()),
        None => anyhow::bail!("try-on needs both a person image and a product"),
    }
    Ok(())
}

fn cmd_link_encode(cfg: &Config, args: PairArgs) -> anyhow::Result<()> {
    let person = ImageRef::new(args.person);
    let cloth = ImageRef::new(args.cloth);
    let link = virtual_mirror::encode_link(&cfg.base_url, &person, &cloth)
        .context("only sample images can be shared by link")?;
    println!("{link}");
    Ok(())
}

fn cmd_link_decode(url: &str) -> anyhow::Result<()> {
    let Some(request) = virtual_mirror::decode_link(url) else {
        anyhow::bail!("'{url}' is not a share link");
    };
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

fn cmd_catalog() -> anyhow::Result<()> {
    for p in virtual_mirror::PRODUCTS {
        println!("{}\t{}\t{}\t{}", p.id, p.name, p.price, p.image);
    }
    for s in virtual_mirror::SAMPLE_PERSONS
        .iter()
        .chain(virtual_mirror::SAMPLE_CLOTHES)
    {
        println!("sample\t{s}");
    }
    Ok(())
}

fn cmd_export(cfg: &Config, args: ExportArgs) -> anyhow::Result<()> {
    let request = pair_request(&args.pair);
    let person = request.person_image.as_ref();
    let cloth = request.cloth_image.as_ref();
    let Some(resolved) = virtual_mirror::resolve(person, cloth) else {
        anyhow::bail!("nothing to export");
    };

    let (w, h) = virtual_mirror::export_png(&cfg.asset_root, &resolved, &args.out)?;
    eprintln!("wrote {} ({w}x{h})", args.out.display());
    Ok(())
}
