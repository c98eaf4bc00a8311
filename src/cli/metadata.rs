use clap::Args;

use crate::core::dataset::Dataset;
use crate::core::types::Identifier;
use crate::ingest::IngestOptions;

/// Dataset provenance and property declarations emitted with every ingest
#[derive(Args, Debug, Default)]
pub struct MetadataArgs {
    /// Dataset title (defaults to the source tag)
    #[arg(long)]
    pub title: Option<String>,

    /// Release of the source data
    #[arg(long = "dataset-version")]
    pub dataset_version: Option<String>,

    /// Date the release was issued (YYYY-MM-DD)
    #[arg(long)]
    pub issued: Option<String>,

    /// License of the source data (IRI or CURIE)
    #[arg(long)]
    pub license: Option<String>,

    /// Work cited as the authority for the dataset; repeatable
    #[arg(long = "cite")]
    pub citations: Vec<String>,

    /// Emit neither the dataset node nor property declarations
    #[arg(long)]
    pub no_metadata: bool,
}

impl MetadataArgs {
    /// Apply these flags to `options`, whose source tag names the dataset
    #[must_use]
    pub fn apply(self, options: IngestOptions) -> IngestOptions {
        if self.no_metadata {
            return options
                .with_dataset(None)
                .with_property_declarations(false);
        }

        let mut dataset = Dataset::new(&options.source);
        if let Some(title) = self.title {
            dataset = dataset.with_title(title);
        }
        if let Some(version) = self.dataset_version {
            dataset = dataset.with_version(version);
        }
        if let Some(issued) = self.issued {
            dataset = dataset.with_date_issued(issued);
        }
        if let Some(license) = self.license {
            dataset = dataset.with_license(Identifier::new(license));
        }
        for citation in self.citations {
            dataset.add_citation(Identifier::new(citation));
        }
        options.with_dataset(Some(dataset))
    }
}
