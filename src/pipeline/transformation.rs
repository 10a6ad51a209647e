//! The data transformation stage

use super::assembler::assemble_array;
use super::config::PipelineConfig;
use crate::dataset::LabeledData;
use crate::entity::{DataIngestionArtifact, DataTransformationArtifact, DataValidationArtifact};
use crate::error::Result;
use crate::export::ArtifactWriter;
use crate::preprocessing::{
    ColumnSelector, ConstantImputer, FittedTransformer, RobustScaler, TransformerObject,
    Transformer,
};
use crate::synthetic::{Sampler, SmoteTomek};
use crate::utils::DataLoader;
use polars::prelude::DataFrame;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};

/// Both splits after selection, scaling, imputation and resampling
#[derive(Debug, Clone)]
pub struct TransformedSplits {
    /// Train-fitted state, reusable at inference time
    pub object: TransformerObject,
    pub train: LabeledData,
    pub test: LabeledData,
}

/// Turns the validated train and test files into model-ready arrays.
///
/// Fitted state flows strictly from train to test: the scaler and imputer
/// are fitted once on the train features, and the same fitted values are
/// applied to the test features.
#[derive(Debug, Clone)]
pub struct DataTransformation {
    ingestion: DataIngestionArtifact,
    validation: DataValidationArtifact,
    config: PipelineConfig,
    loader: DataLoader,
}

impl DataTransformation {
    pub fn new(
        ingestion: DataIngestionArtifact,
        validation: DataValidationArtifact,
        config: PipelineConfig,
    ) -> Self {
        Self {
            ingestion,
            validation,
            config,
            loader: DataLoader::new(),
        }
    }

    /// Builder method to read the split files with a custom loader
    pub fn with_loader(mut self, loader: DataLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the stage and persist its three outputs.
    ///
    /// Nothing is read when validation failed. The returned artifact only
    /// exists once all three files are in place.
    pub fn initiate_data_transformation(&self) -> Result<DataTransformationArtifact> {
        let span = info_span!("data_transformation");
        let _guard = span.enter();
        let start = Instant::now();
        info!("starting data transformation");

        if let Err(err) = self.validation.ensure_passed() {
            warn!(reason = %err, "upstream validation failed, skipping transformation");
            return Err(err);
        }

        let train_df = self.loader.load_csv(&self.ingestion.trained_file_path)?;
        let test_df = self.loader.load_csv(&self.ingestion.test_file_path)?;
        info!(
            train_rows = train_df.height(),
            test_rows = test_df.height(),
            "loaded splits"
        );

        let splits = self.transform_frames(&train_df, &test_df)?;
        let artifact = self.persist(&splits)?;

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            object = %artifact.transformed_object_file_path().display(),
            "data transformation finished"
        );
        Ok(artifact)
    }

    /// The in-memory part of the stage, without any file access
    pub fn transform_frames(&self, train_df: &DataFrame, test_df: &DataFrame) -> Result<TransformedSplits> {
        self.config.resampler.validate()?;
        let selector = ColumnSelector::new(&self.config.schema);
        let train = selector.select(train_df, "train")?;
        let test = selector.select_features(test_df, "test", &train.feature_names)?;
        debug!(features = train.feature_names.len(), "selected feature columns");

        let (scaler, train_x) = RobustScaler::new()
            .fit_transform(train.data.x())
            .map_err(|e| e.in_split("train"))?;
        let test_x = scaler.transform(test.data.x()).map_err(|e| e.in_split("test"))?;
        info!(n_features = scaler.n_features_in(), "fitted robust scaler on train split");

        let (imputer, train_x) = ConstantImputer
            .fit_transform(&train_x)
            .map_err(|e| e.in_split("train"))?;
        let test_x = imputer.transform(&test_x).map_err(|e| e.in_split("test"))?;
        debug!(fill_value = imputer.fill_value(), "imputed missing values");

        let train_data = LabeledData::new(train_x, train.data.y().clone())?;
        let test_data = LabeledData::new(test_x, test.data.y().clone())?;

        let sampler = SmoteTomek::new(&self.config.resampler);
        let train_data = sampler
            .fit_resample(&train_data)
            .map_err(|e| e.in_split("train"))?
            .data;
        let test_data = if self.config.resample_test {
            warn!("resampling the test split; its class distribution no longer matches the source data");
            sampler
                .fit_resample(&test_data)
                .map_err(|e| e.in_split("test"))?
                .data
        } else {
            info!("keeping the test split's class distribution");
            test_data
        };

        Ok(TransformedSplits {
            object: TransformerObject::new(train.feature_names, scaler)?,
            train: train_data,
            test: test_data,
        })
    }

    fn persist(&self, splits: &TransformedSplits) -> Result<DataTransformationArtifact> {
        let paths = &self.config.transformation;
        let train_arr = assemble_array(&splits.train);
        let test_arr = assemble_array(&splits.test);

        let mut writer = ArtifactWriter::new();
        writer.stage_object(&paths.transformed_object_file_path, &splits.object)?;
        writer.stage_array(&paths.transformed_train_file_path, &train_arr)?;
        writer.stage_array(&paths.transformed_test_file_path, &test_arr)?;
        writer.commit()?;

        info!(
            train_shape = ?train_arr.dim(),
            test_shape = ?test_arr.dim(),
            "persisted transformed arrays and transformer object"
        );

        Ok(DataTransformationArtifact::new(
            paths.transformed_object_file_path.clone(),
            paths.transformed_train_file_path.clone(),
            paths.transformed_test_file_path.clone(),
        ))
    }
}
