use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use roller_common::{
  FileNameRenderOptions, FilenameTemplate, FxIndexMap, Output, OutputAsset, OutputBundle,
  StrOrBytes,
};
use roller_error::{BuildResult, BundleError, ErrorCode};
use roller_utils::sanitize_file_name::sanitize_file_name;
use roller_utils::unique_name::make_unique;
use roller_utils::xxhash::xxhash_short;

#[derive(Debug, Clone)]
pub struct EmittedAsset {
  pub name: String,
  pub source: Option<StrOrBytes>,
  pub filename: Option<String>,
}

/// Map of emitted asset ids to pending-or-finalized assets. Ids come from a
/// counter seeded at build start, so emission order fully determines them.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
  assets: FxIndexMap<String, EmittedAsset>,
  next_id: u32,
}

pub type SharedAssetRegistry = Arc<RwLock<AssetRegistry>>;

impl AssetRegistry {
  pub fn emit(&mut self, name: &str, source: Option<StrOrBytes>) -> String {
    let asset_id = format!("{:08x}", self.next_id);
    self.next_id += 1;
    self.assets.insert(
      asset_id.clone(),
      EmittedAsset { name: name.to_string(), source, filename: None },
    );
    asset_id
  }

  pub fn set_source(&mut self, asset_id: &str, source: StrOrBytes) -> BuildResult<()> {
    let Some(asset) = self.assets.get_mut(asset_id) else {
      return Err(BundleError::new(
        ErrorCode::UnknownAsset,
        format!("Unable to set the source for unknown asset \"{asset_id}\"."),
      ));
    };
    if asset.filename.is_some() && asset.source.is_some() {
      return Err(BundleError::new(
        ErrorCode::AssetFinalized,
        format!("Unable to set the source for asset \"{}\", source already set.", asset.name),
      ));
    }
    asset.source = Some(source);
    Ok(())
  }

  pub fn file_name(&self, asset_id: &str) -> BuildResult<String> {
    let Some(asset) = self.assets.get(asset_id) else {
      return Err(BundleError::new(
        ErrorCode::UnknownAsset,
        format!("Unable to get file name for unknown asset \"{asset_id}\"."),
      ));
    };
    asset.filename.clone().ok_or_else(|| {
      BundleError::new(
        ErrorCode::PluginError,
        format!(
          "Unable to get file name for asset \"{}\". Ensure that generate is called first.",
          asset.name
        ),
      )
    })
  }

  /// Expands the filename template for one asset, disambiguates against the
  /// bundle, and places the asset. Filenames are recomputed per generate
  /// call so repeated calls see identical, self-consistent bundles.
  pub fn finalize(
    &mut self,
    asset_id: &str,
    bundle: &mut OutputBundle,
    template: &FilenameTemplate,
  ) -> BuildResult<()> {
    let Some(asset) = self.assets.get_mut(asset_id) else {
      return Err(BundleError::new(
        ErrorCode::UnknownAsset,
        format!("Unable to finalize unknown asset \"{asset_id}\"."),
      ));
    };
    let Some(source) = &asset.source else {
      return Err(BundleError::new(
        ErrorCode::AssetSourceMissing,
        format!("Plugin error creating asset \"{}\" - no asset source set.", asset.name),
      ));
    };

    let name_path = Path::new(&asset.name);
    let stem = name_path
      .file_stem()
      .map(|stem| sanitize_file_name(&stem.to_string_lossy()))
      .unwrap_or_else(|| "asset".to_string());
    let ext = name_path.extension().map(|ext| ext.to_string_lossy().into_owned());
    let hash = xxhash_short(source.as_bytes());

    let rendered = template.render(&FileNameRenderOptions {
      name: Some(&stem),
      hash: Some(&hash),
      ext: ext.as_deref(),
      format: None,
    });
    let filename = make_unique(&rendered, |candidate| {
      bundle.contains_key(candidate) && asset.filename.as_deref() != Some(candidate)
    });

    asset.filename = Some(filename.clone());
    bundle.insert(
      filename.clone(),
      Output::Asset(OutputAsset { filename: filename.into(), source: source.clone() }),
    );
    Ok(())
  }

  /// Start-of-generate pass: every asset that already has a source gets a
  /// filename and a slot in this call's bundle.
  pub fn finalize_all(
    &mut self,
    bundle: &mut OutputBundle,
    template: &FilenameTemplate,
  ) -> BuildResult<()> {
    let pending: Vec<String> = self
      .assets
      .iter()
      .filter(|(_, asset)| asset.source.is_some())
      .map(|(id, _)| id.clone())
      .collect();
    for asset_id in pending {
      self.finalize(&asset_id, bundle, template)?;
    }
    Ok(())
  }

  /// End-of-generate pass: assets still without a filename are finalized
  /// now, and an asset that never received a source is an error.
  pub fn finalize_remaining(
    &mut self,
    bundle: &mut OutputBundle,
    template: &FilenameTemplate,
  ) -> BuildResult<()> {
    let pending: Vec<String> = self
      .assets
      .iter()
      .filter(|(_, asset)| asset.filename.is_none())
      .map(|(id, _)| id.clone())
      .collect();
    for asset_id in pending {
      self.finalize(&asset_id, bundle, template)?;
    }
    Ok(())
  }

  pub fn get(&self, asset_id: &str) -> Option<&EmittedAsset> {
    self.assets.get(asset_id)
  }

  pub fn len(&self) -> usize {
    self.assets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.assets.is_empty()
  }

  /// Copy used to scope `generateBundle` emissions to one generate call.
  pub fn snapshot(&self) -> Self {
    self.clone()
  }
}
