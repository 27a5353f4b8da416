use std::{fmt::Display, path::PathBuf, str::FromStr};

use anyhow::Result;
use clap::{value_t, App, Arg, ArgMatches};
use pointeval_core::{EvalError, EvalResult};

/// Data set that the ground truth cloud belongs to. It decides where the validity filters come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSet {
    /// Observation mask and ground truth plane of the DTU multi-view stereo benchmark
    Dtu,
    /// No masks, every point of both clouds is evaluated
    None,
}

impl FromStr for DataSet {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dtu" => Ok(DataSet::Dtu),
            "none" => Ok(DataSet::None),
            other => Err(EvalError::InvalidParameter(format!(
                "Unknown data set '{}', expected 'dtu' or 'none'",
                other
            ))),
        }
    }
}

impl Display for DataSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSet::Dtu => write!(f, "dtu"),
            DataSet::None => write!(f, "none"),
        }
    }
}

/// Everything a single evaluation run needs to know. Built once at startup and passed to [run](crate::evaluation::run)
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    /// Name of the reconstruction method, used in output file names and the report
    pub method: String,
    /// Reconstructed point cloud
    pub src_ply: PathBuf,
    /// Ground truth point cloud
    pub tgt_ply: PathBuf,
    /// Root directory of the data set masks
    pub data_path: PathBuf,
    /// Directory in which the per-run output directory is created
    pub output_path: PathBuf,
    pub light_setting: String,
    pub representation: String,
    pub scene: String,
    /// Edge length of the voxels used to downsample both clouds
    pub voxel_size: f64,
    /// Distance threshold for precision and recall
    pub max_dist: f64,
    pub data_set: DataSet,
    /// Render the precision/recall plot
    pub plot: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            method: "fusion".into(),
            src_ply: "../src.ply".into(),
            tgt_ply: "../tgt.ply".into(),
            data_path: "../../mvs_data".into(),
            output_path: "./evaluation".into(),
            light_setting: "l3".into(),
            representation: "Points".into(),
            scene: "1".into(),
            voxel_size: 0.2,
            max_dist: 0.4,
            data_set: DataSet::Dtu,
            plot: true,
        }
    }
}

impl EvaluationConfig {
    /// Reads the configuration from the matches of [command_line_app]
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        // All arguments except the flag carry a default value
        let string_arg = |name: &str| matches.value_of(name).unwrap_or_default().to_owned();

        let config = Self {
            method: string_arg("METHOD"),
            src_ply: string_arg("SRC_PLY").into(),
            tgt_ply: string_arg("TGT_PLY").into(),
            data_path: string_arg("DATA_PATH").into(),
            output_path: string_arg("OUTPUT_PATH").into(),
            light_setting: string_arg("LIGHT_SETTING"),
            representation: string_arg("REPRESENTATION"),
            scene: string_arg("SCENE"),
            voxel_size: value_t!(matches, "VOXEL_SIZE", f64)?,
            max_dist: value_t!(matches, "MAX_DIST", f64)?,
            data_set: value_t!(matches, "DATA_SET", DataSet)?,
            plot: !matches.is_present("NO_PLOT"),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the numeric parameters
    ///
    /// # Errors
    ///
    /// [EvalError::InvalidParameter] if the voxel size is not positive or the distance threshold is negative
    pub fn validate(&self) -> EvalResult<()> {
        if !(self.voxel_size > 0.0 && self.voxel_size.is_finite()) {
            return Err(EvalError::InvalidParameter(format!(
                "Voxel size must be positive but is {}",
                self.voxel_size
            )));
        }
        if !(self.max_dist >= 0.0 && self.max_dist.is_finite()) {
            return Err(EvalError::InvalidParameter(format!(
                "Distance threshold must be non-negative but is {}",
                self.max_dist
            )));
        }
        Ok(())
    }

    /// Directory that receives all outputs of this run: `<output_path>/<method>_<scene>_<light>_<representation>`,
    /// with numeric scene names zero-padded to three digits
    pub fn output_dir(&self) -> PathBuf {
        self.output_path.join(format!(
            "{}_{:0>3}_{}_{}",
            self.method, self.scene, self.light_setting, self.representation
        ))
    }
}

/// Command line interface of the `compare_clouds` binary
pub fn command_line_app() -> App<'static, 'static> {
    App::new("compare_clouds")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Point cloud comparison tool. Computes accuracy, completeness, precision and recall of a reconstructed point cloud against a ground truth point cloud")
        .arg(Arg::with_name("METHOD").short("m").long("method").takes_value(true).default_value("fusion").help("Method name (e.g. colmap)"))
        .arg(Arg::with_name("SRC_PLY").short("r").long("src_ply").takes_value(true).default_value("../src.ply").help("Path to the source point cloud file"))
        .arg(Arg::with_name("TGT_PLY").short("t").long("tgt_ply").takes_value(true).default_value("../tgt.ply").help("Path to the target point cloud file"))
        .arg(Arg::with_name("DATA_PATH").short("d").long("data_path").takes_value(true).default_value("../../mvs_data").help("Path to the DTU evaluation data"))
        .arg(Arg::with_name("OUTPUT_PATH").short("o").long("output_path").takes_value(true).default_value("./evaluation").help("Output path where all metrics and results will be stored"))
        .arg(Arg::with_name("LIGHT_SETTING").short("l").long("light_setting").takes_value(true).default_value("l3").help("DTU light setting"))
        .arg(Arg::with_name("REPRESENTATION").short("p").long("representation").takes_value(true).default_value("Points").help("Data representation (Points/Surface)"))
        .arg(Arg::with_name("SCENE").short("s").long("scene").takes_value(true).default_value("1").help("Scene name or number (e.g. Ignatius, Truck, Barn or 1, 4, 9)"))
        .arg(Arg::with_name("VOXEL_SIZE").short("v").long("voxel_size").takes_value(true).default_value("0.2").help("Voxel size used for consistent downsampling"))
        .arg(Arg::with_name("MAX_DIST").short("x").long("max_dist").takes_value(true).default_value("0.4").help("Max distance threshold for point matching"))
        .arg(Arg::with_name("DATA_SET").short("e").long("data_set").takes_value(true).default_value("dtu").possible_values(&["dtu", "none"]).help("Data set whose masks restrict the evaluated points"))
        .arg(Arg::with_name("NO_PLOT").long("no-plot").help("Do not render the precision/recall plot"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<EvaluationConfig> {
        let matches = command_line_app().get_matches_from_safe(
            std::iter::once("compare_clouds").chain(args.iter().copied()),
        )?;
        EvaluationConfig::from_matches(&matches)
    }

    #[test]
    fn test_defaults_match_command_line_defaults() {
        assert_eq!(EvaluationConfig::default(), parse(&[]).unwrap());
    }

    #[test]
    fn test_parse_arguments() {
        let config = parse(&[
            "-m", "colmap", "-r", "a.ply", "--tgt_ply", "b.ply", "-s", "24", "-v", "0.5", "-x",
            "1.5", "-e", "none", "--no-plot",
        ])
        .unwrap();
        assert_eq!("colmap", config.method);
        assert_eq!(PathBuf::from("a.ply"), config.src_ply);
        assert_eq!(PathBuf::from("b.ply"), config.tgt_ply);
        assert_eq!("24", config.scene);
        assert_eq!(0.5, config.voxel_size);
        assert_eq!(1.5, config.max_dist);
        assert_eq!(DataSet::None, config.data_set);
        assert!(!config.plot);
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        assert!(parse(&["-v", "abc"]).is_err());
        assert!(parse(&["-v", "0"]).is_err());
        assert!(parse(&["-x", "-1"]).is_err());
        assert!(parse(&["-e", "tanks"]).is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = EvaluationConfig::default();
        assert!(config.validate().is_ok());
        config.max_dist = 0.0;
        assert!(config.validate().is_ok());
        config.voxel_size = -0.1;
        assert!(matches!(
            config.validate(),
            Err(EvalError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_output_dir() {
        let mut config = EvaluationConfig::default();
        config.output_path = "/out".into();
        config.method = "colmap".into();
        config.scene = "9".into();
        assert_eq!(
            PathBuf::from("/out/colmap_009_l3_Points"),
            config.output_dir()
        );

        config.scene = "Ignatius".into();
        config.representation = "Surface".into();
        assert_eq!(
            PathBuf::from("/out/colmap_Ignatius_l3_Surface"),
            config.output_dir()
        );
    }

    #[test]
    fn test_data_set_from_str() {
        assert_eq!(DataSet::Dtu, "DTU".parse::<DataSet>().unwrap());
        assert_eq!(DataSet::None, "none".parse::<DataSet>().unwrap());
        assert!("eth3d".parse::<DataSet>().is_err());
    }
}
