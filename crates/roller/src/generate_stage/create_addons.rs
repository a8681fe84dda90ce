use roller_common::{AddonHook, NormalizedOutputOptions};
use roller_error::{BuildResult, BundleError};

use crate::chunk::Addons;
use crate::plugin::{PluginContext, PluginDriver};

enum AddonName {
  Banner,
  Footer,
  Intro,
  Outro,
}

/// Resolves the output-option addon followed by every plugin's contribution
/// in declared order. Banner/footer parts join with a single newline,
/// intro/outro with a blank line.
pub(crate) async fn create_addons(
  driver: &PluginDriver,
  ctx: &PluginContext,
  options: &NormalizedOutputOptions,
) -> BuildResult<Addons> {
  Ok(Addons {
    banner: collect(driver, ctx, options.banner.as_ref(), AddonName::Banner, "\n").await?,
    footer: collect(driver, ctx, options.footer.as_ref(), AddonName::Footer, "\n").await?,
    intro: collect(driver, ctx, options.intro.as_ref(), AddonName::Intro, "\n\n").await?,
    outro: collect(driver, ctx, options.outro.as_ref(), AddonName::Outro, "\n\n").await?,
  })
}

async fn collect(
  driver: &PluginDriver,
  ctx: &PluginContext,
  initial: Option<&AddonHook>,
  name: AddonName,
  separator: &str,
) -> BuildResult<String> {
  let mut parts = Vec::new();

  if let Some(addon) = initial {
    let text = addon.resolve().await.map_err(BundleError::from)?;
    if !text.is_empty() {
      parts.push(text);
    }
  }

  for plugin in driver.plugins() {
    let contribution = match name {
      AddonName::Banner => plugin.banner(ctx).await,
      AddonName::Footer => plugin.footer(ctx).await,
      AddonName::Intro => plugin.intro(ctx).await,
      AddonName::Outro => plugin.outro(ctx).await,
    }
    .map_err(|err| BundleError::from_plugin(&plugin.name(), err))?;
    if let Some(text) = contribution {
      if !text.is_empty() {
        parts.push(text);
      }
    }
  }

  Ok(parts.join(separator))
}
