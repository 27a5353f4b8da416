use anyhow::Result;
use clap::{App, Arg};
use pointeval_tools::latex::create_subfigures;

struct Args {
    pub images: Vec<String>,
    pub captions: Vec<String>,
    pub labels: Vec<String>,
}

fn get_args() -> Args {
    let matches = App::new("latex_figures")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prints a LaTeX figure that shows the given images side by side")
        .arg(Arg::with_name("IMAGE").short("i").long("image").takes_value(true).multiple(true).number_of_values(1).required(true).help("Image file, repeat for every subfigure"))
        .arg(Arg::with_name("CAPTION").short("c").long("caption").takes_value(true).multiple(true).number_of_values(1).required(true).help("Subfigure caption, one per image. An additional last caption is used for the whole figure"))
        .arg(Arg::with_name("LABEL").short("l").long("label").takes_value(true).multiple(true).number_of_values(1).required(true).help("Subfigure label without the 'fig:' prefix, one per image. An additional last label is used for the whole figure"))
        .get_matches();

    let values = |name: &str| -> Vec<String> {
        matches
            .values_of(name)
            .map(|values| values.map(String::from).collect())
            .unwrap_or_default()
    };

    Args {
        images: values("IMAGE"),
        captions: values("CAPTION"),
        labels: values("LABEL"),
    }
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = get_args();
    let figure = create_subfigures(&args.images, &args.captions, &args.labels)?;
    println!("{}", figure);

    Ok(())
}
