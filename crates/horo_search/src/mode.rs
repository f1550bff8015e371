//! Chart modes and the settings that drive them.
//!
//! A [`BirthContext`] carries every field group of the birth form plus one
//! [`ChartMode`]. [`run_mode`] picks the groups that mode needs, builds the
//! requests and runs the matching branch.

use horo_chart::{
    Aspect, Chart, ChartRequest, EphemerisProvider, HouseSystem, compute_chart,
    cross_chart_aspects, forecast_aspects,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::birth::BirthFields;
use crate::calendar::{
    AspectInterval, CalendarDay, HourlySweepConfig, IntervalSweepConfig,
    fast_progression_calendar, slow_progression_calendar, transit_calendar,
};
use crate::error::SearchError;
use crate::exact::{ExactSearchConfig, exact_transit_time};
use crate::progression::{fast_progressed_chart, slow_progressed_chart};

/// What to compute for a birth context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMode {
    /// Chart of the primary group.
    #[default]
    Natal,
    /// Primary moment cast for the place of the local group.
    Local,
    /// Synastry between the primary and comparison groups.
    Compatibility,
    /// Natal chart against transits at the forecast group.
    Transit,
    /// Secondary progression to the forecast moment.
    SlowProgression,
    /// Fast progression to the forecast moment.
    FastProgression,
}

/// All field groups of the birth form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthContext {
    pub primary: BirthFields,
    #[serde(default)]
    pub local: Option<BirthFields>,
    #[serde(default)]
    pub comparison: Option<BirthFields>,
    #[serde(default)]
    pub forecast: Option<BirthFields>,
    #[serde(default)]
    pub house_system: HouseSystem,
    #[serde(default)]
    pub mode: ChartMode,
}

impl BirthContext {
    pub fn new(primary: BirthFields, mode: ChartMode) -> Self {
        Self {
            primary,
            local: None,
            comparison: None,
            forecast: None,
            house_system: HouseSystem::default(),
            mode,
        }
    }

    pub fn with_local(self, local: BirthFields) -> Self {
        Self {
            local: Some(local),
            ..self
        }
    }

    pub fn with_comparison(self, comparison: BirthFields) -> Self {
        Self {
            comparison: Some(comparison),
            ..self
        }
    }

    pub fn with_forecast(self, forecast: BirthFields) -> Self {
        Self {
            forecast: Some(forecast),
            ..self
        }
    }

    pub fn with_house_system(self, house_system: HouseSystem) -> Self {
        Self {
            house_system,
            ..self
        }
    }

    fn request(
        &self,
        fields: &BirthFields,
        settings: &SearchSettings,
    ) -> Result<ChartRequest, SearchError> {
        let request = fields.to_request(self.house_system)?;
        Ok(match settings.obliquity_deg {
            Some(eps) => request.with_obliquity(eps),
            None => request,
        })
    }

    fn group<'a>(
        group: &'a Option<BirthFields>,
        name: &'static str,
    ) -> Result<&'a BirthFields, SearchError> {
        group.as_ref().ok_or(SearchError::MissingInput(name))
    }
}

/// Tunables for every search and sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchSettings {
    /// Obliquity override for chart requests, degrees.
    pub obliquity_deg: Option<f64>,
    pub exact: ExactSearchConfig,
    pub hourly: HourlySweepConfig,
    pub interval: IntervalSweepConfig,
    /// Refine each transit calendar entry to its exact time.
    pub refine_exact_times: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            obliquity_deg: None,
            exact: ExactSearchConfig::default(),
            hourly: HourlySweepConfig::default(),
            interval: IntervalSweepConfig::default(),
            refine_exact_times: false,
        }
    }
}

impl SearchSettings {
    pub fn validate(&self) -> Result<(), SearchError> {
        if let Some(eps) = self.obliquity_deg {
            if !eps.is_finite() || !(0.0..90.0).contains(&eps) {
                return Err(SearchError::InvalidConfig("obliquity_deg must be in [0, 90)"));
            }
        }
        self.exact.validate().map_err(SearchError::InvalidConfig)?;
        self.hourly.validate().map_err(SearchError::InvalidConfig)?;
        self.interval.validate().map_err(SearchError::InvalidConfig)?;
        Ok(())
    }
}

/// Result of [`run_mode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ModeOutcome {
    Natal {
        chart: Chart,
    },
    Local {
        chart: Chart,
    },
    Compatibility {
        primary: Chart,
        comparison: Chart,
        aspects: Vec<Aspect>,
    },
    Transit {
        natal: Chart,
        transit: Chart,
        aspects: Vec<Aspect>,
        calendar: Vec<CalendarDay>,
    },
    SlowProgression {
        natal: Chart,
        progressed: Chart,
        aspects: Vec<Aspect>,
        calendar: Vec<AspectInterval>,
    },
    FastProgression {
        natal: Chart,
        progressed: Chart,
        aspects: Vec<Aspect>,
        calendar: Vec<CalendarDay>,
    },
}

/// Run the branch selected by `context.mode`.
///
/// Fails with [`SearchError::MissingInput`] when the mode needs a field group
/// that is absent.
#[instrument(skip_all, fields(mode = ?context.mode))]
pub fn run_mode<P>(
    provider: &P,
    context: &BirthContext,
    settings: &SearchSettings,
) -> Result<ModeOutcome, SearchError>
where
    P: EphemerisProvider + ?Sized,
{
    settings.validate()?;
    let natal_request = context.request(&context.primary, settings)?;

    match context.mode {
        ChartMode::Natal => Ok(ModeOutcome::Natal {
            chart: compute_chart(provider, &natal_request)?,
        }),
        ChartMode::Local => {
            let local = BirthContext::group(&context.local, "local")?;
            let request = natal_request.located(local.geo()?);
            Ok(ModeOutcome::Local {
                chart: compute_chart(provider, &request)?,
            })
        }
        ChartMode::Compatibility => {
            let comparison = BirthContext::group(&context.comparison, "comparison")?;
            let comparison_request = context.request(comparison, settings)?;
            let primary = compute_chart(provider, &natal_request)?;
            let comparison = compute_chart(provider, &comparison_request)?;
            let aspects = cross_chart_aspects(&primary.positions, &comparison.positions, false);
            Ok(ModeOutcome::Compatibility {
                primary,
                comparison,
                aspects,
            })
        }
        ChartMode::Transit => {
            let forecast = BirthContext::group(&context.forecast, "forecast")?;
            let transit_request = context.request(forecast, settings)?;
            let natal = compute_chart(provider, &natal_request)?;
            let transit = compute_chart(provider, &transit_request)?;
            let aspects = cross_chart_aspects(&natal.positions, &transit.positions, false);
            let mut calendar = transit_calendar(
                provider,
                &natal,
                &transit_request,
                &transit_request.moment,
                &settings.hourly,
            )?;
            if settings.refine_exact_times {
                refine_calendar(provider, &natal, &transit_request, &mut calendar, &settings.exact)?;
            }
            Ok(ModeOutcome::Transit {
                natal,
                transit,
                aspects,
                calendar,
            })
        }
        ChartMode::SlowProgression => {
            let forecast = BirthContext::group(&context.forecast, "forecast")?;
            let reference = forecast.moment()?;
            let natal = compute_chart(provider, &natal_request)?;
            let progressed = slow_progressed_chart(provider, &natal_request, &natal, &reference)?;
            let aspects = forecast_aspects(
                &natal.positions,
                &natal.cusps,
                &progressed.positions,
                &progressed.cusps,
            );
            let calendar = slow_progression_calendar(
                provider,
                &natal_request,
                &natal,
                &reference,
                &settings.interval,
            )?;
            Ok(ModeOutcome::SlowProgression {
                natal,
                progressed,
                aspects,
                calendar,
            })
        }
        ChartMode::FastProgression => {
            let forecast = BirthContext::group(&context.forecast, "forecast")?;
            let reference = forecast.moment()?;
            let natal = compute_chart(provider, &natal_request)?;
            let progressed = fast_progressed_chart(provider, &natal_request, &natal, &reference)?;
            let aspects = cross_chart_aspects(&natal.positions, &progressed.positions, false);
            let calendar = fast_progression_calendar(
                provider,
                &natal_request,
                &natal,
                &reference,
                &settings.hourly,
            )?;
            Ok(ModeOutcome::FastProgression {
                natal,
                progressed,
                aspects,
                calendar,
            })
        }
    }
}

/// Replace each calendar entry's time and orb with the exact-aspect result
/// when the solver finds one.
fn refine_calendar<P>(
    provider: &P,
    natal: &Chart,
    transit: &ChartRequest,
    calendar: &mut [CalendarDay],
    config: &ExactSearchConfig,
) -> Result<(), SearchError>
where
    P: EphemerisProvider + ?Sized,
{
    for day in calendar.iter_mut() {
        for timed in &mut day.aspects {
            let key = timed.aspect.key();
            let hit = exact_transit_time(provider, natal, transit, &key, timed.moment, config)?;
            if hit.found() {
                debug!(%key, from = %timed.moment, to = %hit.moment, orb = hit.orb, "refined");
                timed.moment = hit.moment;
                timed.aspect.orb = hit.orb;
            }
        }
    }
    Ok(())
}
