use argh::FromArgs;
use std::path::{Path, PathBuf};

use imageops_filter::{FilterEngine, FilterOptions, Kernel, DEFAULT_KERNEL_SIZE, DEFAULT_SIGMA};

#[derive(FromArgs)]
/// Run mean, median, Gaussian and bilateral filters over a grayscale image
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// directory the filtered PNGs are written to (default: current directory)
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,

    /// bilateral neighborhood size (default: 21)
    #[argh(option, short = 's', default = "21")]
    bilateral_size: u32,

    /// bilateral intensity spread (default: 100)
    #[argh(option, default = "100.0")]
    sigma_range: f64,

    /// bilateral spatial spread (default: 100)
    #[argh(option, default = "100.0")]
    sigma_spatial: f64,

    /// leave the last rows and columns unwritten and use kernel-index distances
    #[argh(switch)]
    truncated: bool,
}

fn save(engine: &FilterEngine, dir: &Path, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = dir.join(name);
    engine.result_as::<u8>().save(&path)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let options = if args.truncated {
        FilterOptions::truncated()
    } else {
        FilterOptions::default()
    };

    // read the image and convert it to grayscale
    let image = image::open(&args.image_path)?;
    let mut engine = FilterEngine::with_options(options);
    engine.load_dynamic(&image)?;
    std::fs::create_dir_all(&args.output_dir)?;

    engine.apply_linear(&Kernel::mean(DEFAULT_KERNEL_SIZE)?)?;
    save(&engine, &args.output_dir, "mean_result.png")?;

    engine.apply_median(DEFAULT_KERNEL_SIZE)?;
    save(&engine, &args.output_dir, "median_result.png")?;

    engine.apply_linear(&Kernel::gaussian(5, DEFAULT_SIGMA)?)?;
    save(&engine, &args.output_dir, "gaussian_result.png")?;

    engine.apply_bilateral(args.bilateral_size, args.sigma_range, args.sigma_spatial)?;
    save(&engine, &args.output_dir, "bilateral_result.png")?;

    Ok(())
}
