use crate::analyzers::ExtentAnalyzer;
use crate::cli::args::{Cli, Commands, FilterArgs};
use crate::config::{LongitudeMode, PipelineConfig, ProjectLayout};
use crate::error::Result;
use crate::processors::{IndexPipeline, PipelineOutput};
use crate::utils::constants::{
    REQUIRED_COLUMNS, SAMPLE_TABLE_JSON, SAMPLE_TABLE_JSON_GZ, SEARCH_TABLE_JSON,
    SEARCH_TABLE_JSON_GZ,
};
use crate::utils::filename::display_relative;
use crate::utils::progress::ProgressReporter;
use crate::writers::{LookupWriter, OutputFileInfo};
use tracing::info;

/// Prints report lines unless `--quiet` was given.
struct Console {
    quiet: bool,
}

impl Console {
    fn say(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    fn report_written(&self, written: &[OutputFileInfo], layout: &ProjectLayout) {
        for info in written {
            self.say(&info.summary(&layout.root));
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let layout = ProjectLayout::load(&cli.root, cli.config.as_deref())?
        .with_data_dir(cli.data_dir)
        .with_docs_dir(cli.docs_dir)
        .with_index_file(cli.index_file);
    layout.check()?;
    info!(
        data_dir = %layout.data_dir.display(),
        docs_dir = %layout.docs_dir.display(),
        index_file = %layout.index_file,
        "layout resolved"
    );

    let console = Console { quiet: cli.quiet };

    match cli.command {
        Commands::Build {
            filters,
            row_limit,
            no_gzip,
        } => {
            let config =
                apply_filters(PipelineConfig::full_table(), &filters).with_row_limit(row_limit);
            write_lookup(config, &layout, &console, !no_gzip)?;
        }

        Commands::ByYear { filters, row_limit } => {
            let config =
                apply_filters(PipelineConfig::by_year(), &filters).with_row_limit(row_limit);
            write_lookup(config, &layout, &console, false)?;
        }

        Commands::Sample { rows, filters } => {
            let config = apply_filters(PipelineConfig::sample(rows), &filters);
            let output = run_pipeline(config, &layout, &console)?;

            layout.ensure_output_dirs()?;
            let writer = LookupWriter::new();
            let mut written = writer.write_single(
                &output.records,
                &layout.data_dir.join(SAMPLE_TABLE_JSON),
                Some(&layout.docs_dir.join(SAMPLE_TABLE_JSON_GZ)),
            )?;

            // the web app fetches fixed names; both receive the gzip bytes
            let sample_gz = written[1].clone();
            for name in [SEARCH_TABLE_JSON_GZ, SEARCH_TABLE_JSON] {
                written.push(writer.duplicate(&sample_gz, &layout.docs_dir.join(name))?);
            }

            console.say(&format!("✓ kept {} rows", output.records.len()));
            console.report_written(&written, &layout);
        }

        Commands::Extent => {
            let config = PipelineConfig::full_table()
                .with_columns(REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect());
            let pipeline = IndexPipeline::new(config)?;

            let progress = ProgressReporter::new_spinner("Loading index...", console.quiet);
            let (_source, records) = pipeline.load(&layout, Some(&progress))?;
            progress.finish_and_clear();

            let report = ExtentAnalyzer::new().analyze(&records);
            console.say(&report.detailed_summary());
        }
    }

    Ok(())
}

fn apply_filters(config: PipelineConfig, filters: &FilterArgs) -> PipelineConfig {
    let mode = filters.longitude_mode.unwrap_or(config.longitude_mode);
    config
        .with_delayed_mode_only(filters.delayed_mode_only)
        .with_longitude_mode(mode)
}

/// Full table or year partitions, depending on `config.partition_by_year`.
fn write_lookup(
    config: PipelineConfig,
    layout: &ProjectLayout,
    console: &Console,
    gzip_copy: bool,
) -> Result<()> {
    let partitioned = config.partition_by_year;
    let output = run_pipeline(config, layout, console)?;
    let writer = LookupWriter::new();

    if partitioned {
        if output.records.is_empty() {
            console.say("No records to write");
            return Ok(());
        }

        layout.ensure_output_dirs()?;
        let written = writer.write_partitioned(&output.records, &layout.docs_dir)?;
        console.report_written(&written, layout);
        console.say(&format!("Wrote {} year files", written.len()));
    } else {
        layout.ensure_output_dirs()?;
        let plain = layout.data_dir.join(SEARCH_TABLE_JSON);
        let gzip = layout.docs_dir.join(SEARCH_TABLE_JSON_GZ);
        let written = writer.write_single(
            &output.records,
            &plain,
            gzip_copy.then_some(gzip.as_path()),
        )?;
        console.report_written(&written, layout);
    }

    Ok(())
}

fn run_pipeline(
    config: PipelineConfig,
    layout: &ProjectLayout,
    console: &Console,
) -> Result<PipelineOutput> {
    let pipeline = IndexPipeline::new(config)?;
    info!(config = ?pipeline.config(), "starting pipeline");

    let progress = ProgressReporter::new_spinner("Loading index...", console.quiet);
    let output = pipeline.run(layout, Some(&progress))?;
    progress.finish_and_clear();

    if pipeline.config().longitude_mode == LongitudeMode::Normalized {
        info!("longitudes normalized to [0, 360)");
    }
    console.say(&format!(
        "Read {} ({})",
        display_relative(&output.source.path, &layout.root),
        output.source.kind
    ));
    console.say(&output.filter_report.summary());
    Ok(output)
}
