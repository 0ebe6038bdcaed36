use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::{FilterCriteria, PlotSize, Selector};

/// Health insurance dashboard: explore charges by region, smoker status and age.
#[derive(Parser, Debug, Clone)]
#[command(name = "insurance-dashboard", version, about)]
pub struct Args {
    /// CSV file with age, sex, bmi, children, smoker, region and charges columns
    #[arg(long, default_value = "insurance.csv")]
    pub data: PathBuf,

    /// Initial region (or "total" for every region)
    #[arg(long, default_value = "southeast")]
    pub region: String,

    /// Initial smoker selector (or "total" for everyone)
    #[arg(long, default_value = "total")]
    pub smoker: String,

    /// Lower bound of the initial age range (inclusive)
    #[arg(long, default_value_t = 20)]
    pub age_min: u32,

    /// Upper bound of the initial age range (inclusive)
    #[arg(long, default_value_t = 50)]
    pub age_max: u32,

    /// Rename smoker values yes/no to smoker/nonsmoker after loading
    #[arg(long)]
    pub relabel_smoker: bool,

    /// Show the pie chart of total charges by region
    #[arg(long)]
    pub pie: bool,

    /// Chart width in points
    #[arg(long, requires = "height")]
    pub width: Option<f32>,

    /// Chart height in points
    #[arg(long, requires = "width")]
    pub height: Option<f32>,

    /// Print the loaded table as CSV and exit instead of opening a window
    #[arg(long)]
    pub print: bool,
}

impl Args {
    /// Initial filter criteria, with the age range clamped to `bounds`
    /// (the data's youngest and oldest ages) and put in order.
    pub fn criteria(&self, bounds: Option<(u32, u32)>) -> FilterCriteria {
        let (mut lo, mut hi) = (self.age_min, self.age_max);
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        if let Some((min_age, max_age)) = bounds {
            lo = lo.clamp(min_age, max_age);
            hi = hi.clamp(min_age, max_age);
        }

        FilterCriteria {
            region: Selector::parse(&self.region),
            smoker: Selector::parse(&self.smoker),
            age_min: lo,
            age_max: hi,
            plot_size: self
                .width
                .zip(self.height)
                .map(|(width, height)| PlotSize { width, height }),
        }
    }
}
