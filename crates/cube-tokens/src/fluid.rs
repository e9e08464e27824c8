//! Fluid type and space scales.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A fluid token grows linearly from its `min` size at the smallest viewport
//! to its `max` size at the largest one, and is clamped outside that range:
//!
//! ```text
//! clamp(<min>rem, <intersection>rem + <slope>vw, <max>rem)
//! ```
//!
//! Sizes are authored in px and converted with a 16px root size.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TokenError;
use crate::file::{ItemValue, TokenItem};

const ROOT_SIZE: f64 = 16.0;

/// Viewport widths, in px, the fluid scale interpolates between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewports {
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<f64>,
    pub max: f64,
}

impl Viewports {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            mid: None,
            max,
        }
    }

    pub fn validate(&self) -> Result<(), TokenError> {
        if self.max <= self.min {
            return Err(TokenError::InvalidViewports {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for Viewports {
    fn default() -> Self {
        Self::new(320.0, 1350.0)
    }
}

/// Replace every fluid item's bounds with its `clamp()` value.
///
/// ```
/// use cube_tokens::{TokenItem, Viewports, clamp_generator};
///
/// let items = clamp_generator(&[TokenItem::fluid("Step 0", 16.0, 18.0)], &Viewports::new(320.0, 1240.0)).unwrap();
/// assert_eq!(
///     items[0].value.as_ref().map(|v| v.to_token_value().to_css()).as_deref(),
///     Some("clamp(1rem, 0.96rem + 0.22vw, 1.125rem)")
/// );
/// ```
pub fn clamp_generator(
    items: &[TokenItem],
    viewports: &Viewports,
) -> Result<Vec<TokenItem>, TokenError> {
    viewports.validate()?;

    let generated = items
        .iter()
        .map(|item| {
            let (Some(min), Some(max)) = (item.min, item.max) else {
                return Err(TokenError::MissingBounds {
                    name: item.name.clone(),
                });
            };
            Ok(TokenItem {
                name: item.name.clone(),
                value: Some(ItemValue::Text(fluid_value(min, max, viewports))),
                min: item.min,
                max: item.max,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = generated.len(), "generated fluid tokens");
    Ok(generated)
}

fn fluid_value(min: f64, max: f64, viewports: &Viewports) -> String {
    let min_size = min / ROOT_SIZE;
    let max_size = max / ROOT_SIZE;
    if min == max {
        return format!("{}rem", min_size);
    }

    let min_viewport = viewports.min / ROOT_SIZE;
    let max_viewport = viewports.max / ROOT_SIZE;
    let slope = (max_size - min_size) / (max_viewport - min_viewport);
    let intersection = -min_viewport * slope + min_size;

    format!(
        "clamp({}rem, {}rem + {}vw, {}rem)",
        min_size,
        fixed2(intersection),
        fixed2(slope * 100.0),
        max_size
    )
}

fn fixed2(value: f64) -> String {
    let text = format!("{:.2}", value);
    if text == "-0.00" {
        "0.00".to_string()
    } else {
        text
    }
}
