use embassy_time::Duration;

use crate::control::{Control, ControlValue, NumberBounds, NumberKind, SelectKind};
use crate::effect::EffectKind;
use crate::error::ControlError;
use crate::language::Language;
use crate::layer::LightLayer;
use crate::settings::LayerLight;
use crate::word_mask::SecondsMode;

/// Validated change to the renderer state.
///
/// Applied at the start of the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlIntent {
    SetPower(bool),
    SetLight(LightLayer, LayerLight),
    /// Number control value, already within bounds
    SetNumber(NumberKind, f32),
    /// Fade durations of one layer, `None` keeps the current value
    SetFade {
        layer: LightLayer,
        fade_in: Option<Duration>,
        fade_out: Option<Duration>,
    },
    SetEffect(LightLayer, EffectKind),
    SetSecondsMode(SecondsMode),
    SetLanguage(Language),
    FactoryReset,
}

impl ControlIntent {
    /// Validate a control write
    pub fn parse(
        control: Control,
        value: ControlValue<'_>,
        bounds: &[NumberBounds; NumberKind::COUNT],
    ) -> Result<Self, ControlError> {
        match (control, value) {
            (Control::Power, ControlValue::Switch(on)) => Ok(Self::SetPower(on)),
            (Control::Light(layer), ControlValue::Light(light)) => Ok(Self::SetLight(layer, light)),
            (Control::Number(kind), ControlValue::Number(value)) => {
                // Negative durations mean "no fade"
                let value = if kind.is_duration() && value < 0.0 {
                    0.0
                } else {
                    value
                };
                let value = bounds[kind.index()].check(value)?;
                Ok(Self::SetNumber(kind, value))
            }
            (Control::Select(kind), ControlValue::Select(option)) => Self::parse_select(kind, option),
            (Control::FactoryReset, ControlValue::Press) => Ok(Self::FactoryReset),
            _ => Err(ControlError::TypeMismatch),
        }
    }

    fn parse_select(kind: SelectKind, option: &str) -> Result<Self, ControlError> {
        let intent = match kind {
            SelectKind::SecondsMode => SecondsMode::parse_from_str(option).map(Self::SetSecondsMode),
            SelectKind::Effect(layer) => {
                EffectKind::parse_from_str(option).map(|kind| Self::SetEffect(layer, kind))
            }
            SelectKind::Language => Language::parse_from_str(option).map(Self::SetLanguage),
        };
        intent.ok_or(ControlError::UnknownOption)
    }
}
