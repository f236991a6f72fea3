use crate::milestones::Milestone;
use crate::{min_and_max, positive_min, DataError, TimeVolume, VERSION};
use chrono::NaiveDate;
use clap::{App, Arg};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::path::{Path, PathBuf};

/// 10 x 8 in figure at 600 dpi
const IMG_SIZE: (u32, u32) = (6000, 4800);

const GOLDENROD: RGBColor = RGBColor(218, 165, 32);
const GUIDE_GREY: RGBColor = RGBColor(120, 120, 120);

/// axis values are in Pbp, tick labels are chosen after scaling by 1e6
const PBP_TO_GB: f64 = 1e6;

/// Takes the CLI argument that sets the output path of the plot.
pub fn parse_cli() -> PathBuf {
    let arg_out = Arg::with_name("output_file")
        .help("path of the output image file; svg by extension, png family otherwise")
        .required(true)
        .index(1);
    let cli_args = App::new("sra_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to fetch the SRA growth statistics and plot them")
        .arg(arg_out)
        .get_matches();
    PathBuf::from(cli_args.value_of("output_file").unwrap_or_default())
}

/// Formats a y tick label, switching the unit text with the magnitude
/// of the GB-scaled axis value.
pub fn format_tick(value_in_gb: f64) -> String {
    if value_in_gb < 1e3 {
        format!("{:.0} GB", value_in_gb)
    } else if value_in_gb < 1e6 {
        format!("{:.0} TB", value_in_gb / 1e3)
    } else {
        format!("{:.0} PB", value_in_gb)
    }
}

/// Plots the total and open-access growth series with the doubling
/// milestones to a single image file at `fout`.
/// The backend follows the file extension: svg, or bitmap for anything else.
pub fn plot_growth(
    tv: &TimeVolume,
    milestones: &[Milestone],
    fout: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    match fout.extension().and_then(|e| e.to_str()) {
        Some("svg") => render(SVGBackend::new(fout, IMG_SIZE).into_drawing_area(), tv, milestones),
        _ => render(BitMapBackend::new(fout, IMG_SIZE).into_drawing_area(), tv, milestones),
    }
}

fn render<DB>(
    root: DrawingArea<DB, Shift>,
    tv: &TimeVolume,
    milestones: &[Milestone],
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (xmin, xmax) = min_and_max(&tv.date[..]).ok_or(DataError::Empty)?;
    let xspan = xmax - xmin;
    let xmargin = if xspan.is_zero() {
        chrono::Duration::days(183)
    } else {
        xspan / 20
    };
    let xmin = xmin - xmargin;
    let xmax = xmax + xmargin;
    let ymin = match (positive_min(&tv.pbp), positive_min(&tv.open_pbp)) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return Err(DataError::NoPositiveValues.into()),
    };
    let (_, ymax) = min_and_max(&tv.pbp[..]).ok_or(DataError::Empty)?;
    // factor-of-2 padding on the log axis
    let ymin = ymin / 2.0;
    let ymax = ymax * 2.0;

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(60)
        .caption("Sequence Read Archive (SRA) growth", ("sans-serif", 120))
        .x_label_area_size(320)
        .y_label_area_size(520)
        .build_cartesian_2d((xmin..xmax).yearly(), (ymin..ymax).log_scale())?;
    chart
        .configure_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(RGBColor(200, 200, 200).stroke_width(3))
        .set_all_tick_mark_size(10)
        .label_style(("sans-serif", 80))
        .x_label_style(
            ("sans-serif", 80)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y").to_string())
        .y_label_formatter(&|v: &f64| format_tick(v * PBP_TO_GB))
        .x_desc("Year")
        .y_desc("Data Volume")
        .draw()?;

    // nonpositive points have no place on the log axis
    let total = LineSeries::new(
        tv.date
            .iter()
            .zip(tv.pbp.iter())
            .filter(|(_, &v)| v > 0.0)
            .map(|(&d, &v)| (d, v)),
        BLUE.stroke_width(10),
    );
    chart
        .draw_series(total)?
        .label("Total")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 120, y)], BLUE.stroke_width(10)));
    let open_access = LineSeries::new(
        tv.date
            .iter()
            .zip(tv.open_pbp.iter())
            .filter(|(_, &v)| v > 0.0)
            .map(|(&d, &v)| (d, v)),
        GOLDENROD.stroke_width(10),
    );
    chart
        .draw_series(open_access)?
        .label("Open access")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 120, y)], GOLDENROD.stroke_width(10)));
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 80))
        .draw()?;

    let annotate = |date: NaiveDate, pbp: f64, dy: i32, color: RGBColor| {
        // straight leader from the label to the point stands in for an arrow
        let tail = if dy < 0 { (36, dy + 75) } else { (36, dy - 5) };
        EmptyElement::at((date, pbp))
            + PathElement::new(vec![tail, (6, 0)], color.stroke_width(4))
            + Circle::new((0, 0), 8, color.filled())
            + Text::new(
                format!("{:.1} Pbp", pbp),
                (40, dy),
                ("sans-serif", 70).into_font().color(&color),
            )
    };

    for m in milestones {
        chart.draw_series(DashedLineSeries::new(
            [(m.date, ymin), (m.date, ymax)].iter().copied(),
            20,
            15,
            GUIDE_GREY.stroke_width(4),
        ))?;
        chart.draw_series(std::iter::once(annotate(m.date, m.pbp, -90, BLACK)))?;
    }

    // the most recent value of each series gets its own label,
    // milestone or not
    if let Some((last_date, last_total, last_open)) = tv.last() {
        chart.draw_series(std::iter::once(annotate(last_date, last_total, -90, BLUE)))?;
        chart.draw_series(std::iter::once(annotate(last_date, last_open, 60, GOLDENROD)))?;
    }

    root.present()?;
    Ok(())
}
