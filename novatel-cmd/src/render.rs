use anyhow::{Context, Result};
use handlebars::{handlebars_helper, Handlebars};
use hifitime::Epoch;
use novatel::framing::RawFrame;
use novatel::messages::Record;
use serde::Serialize;

#[derive(Debug, Clone)]
pub enum Format {
    Json,
    Text,
}

impl clap::ValueEnum for Format {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Json, Self::Text]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Json => Some(clap::builder::PossibleValue::new("json")),
            Self::Text => Some(clap::builder::PossibleValue::new("text")),
        }
    }
}

/// A decoded record along with the header fields worth showing.
#[derive(Debug, Serialize)]
struct Output<'a> {
    sequence: Option<u16>,
    gps_time: Option<Epoch>,
    time_status: Option<&'static str>,
    #[serde(flatten)]
    record: &'a Record,
}

impl<'a> Output<'a> {
    fn new(frame: &RawFrame, record: &'a Record) -> Self {
        let header = frame.header();
        Output {
            sequence: header.as_ref().map(|h| h.sequence),
            gps_time: header.as_ref().map(|h| h.epoch()),
            time_status: header.as_ref().map(|h| h.time_status_label()),
            record,
        }
    }
}

pub struct Renderer {
    format: Format,
    hb: Handlebars<'static>,
}

impl Renderer {
    pub fn new(format: &Format) -> Result<Self> {
        handlebars_helper!(fixed: |v: f64, places: u64| {
            format!("{v:.prec$}", prec = usize::try_from(places).unwrap_or(0))
        });
        handlebars_helper!(or_na: |v: Json| match v {
            serde_json::Value::Null => "n/a".to_string(),
            serde_json::Value::String(s) => s.to_owned(),
            _ => v.to_string(),
        });
        let mut hb = Handlebars::new();
        hb.register_escape_fn(handlebars::no_escape);
        hb.register_helper("fixed", Box::new(fixed));
        hb.register_helper("or_na", Box::new(or_na));
        hb.register_template_string("bestpos", BESTPOS_TEMPLATE)
            .context("registering bestpos template")?;
        hb.register_template_string("version", VERSION_TEMPLATE)
            .context("registering version template")?;

        Ok(Renderer {
            format: format.clone(),
            hb,
        })
    }

    /// Render `record`, decoded from `frame`, as a single block of text or a single
    /// line of JSON.
    pub fn render(&self, frame: &RawFrame, record: &Record) -> Result<String> {
        let output = Output::new(frame, record);
        match self.format {
            Format::Json => serde_json::to_string(&output).context("serializing to json"),
            Format::Text => {
                let name = match record {
                    Record::BestPos(_) => "bestpos",
                    Record::Version(_) => "version",
                };
                self.hb.render(name, &output).context("rendering text")
            }
        }
    }
}

const BESTPOS_TEMPLATE: &str = r"BESTPOS #{{ or_na sequence }} {{ or_na gps_time }} ({{ or_na time_status }})
  Solution status:  {{ solution_status.label }}
  Position type:    {{ position_type.label }}
  Latitude:         {{ fixed latitude 9 }}
  Longitude:        {{ fixed longitude 9 }}
  Height:           {{ fixed height 3 }} m
  Undulation:       {{ fixed undulation 3 }} m
  Datum:            {{ datum.label }}
  Std dev:          lat {{ fixed latitude_std_dev 3 }} m, lon {{ fixed longitude_std_dev 3 }} m, hgt {{ fixed height_std_dev 3 }} m
  Base station:     {{ base_station_id }}
  Differential age: {{ fixed differential_age 3 }} s
  Solution age:     {{ fixed solution_age 3 }} s
  Satellites:       {{ sats_tracked }} tracked, {{ sats_used }} used, {{ sats_l1_used }} L1, {{ sats_multi_used }} multi-frequency
  Glide:            {{ or_na extended_status.glide }}
  Ionosphere:      {{#if extended_status.iono_klobuchar}} klobuchar{{/if}}{{#if extended_status.iono_sbas}} sbas{{/if}}{{#if extended_status.iono_multi_frequency}} multi-frequency{{/if}}{{#if extended_status.iono_psrdiff}} psrdiff{{/if}}{{#if extended_status.iono_novatel}} novatel{{/if}}
  Antenna warning:  {{ extended_status.antenna_warning }}
  Signals:         {{#if signals_used.gps_l1}} GPS-L1{{/if}}{{#if signals_used.gps_l2}} GPS-L2{{/if}}{{#if signals_used.gps_l5}} GPS-L5{{/if}}{{#if signals_used.glonass_l1}} GLO-L1{{/if}}{{#if signals_used.glonass_l2}} GLO-L2{{/if}}{{#if signals_used.galileo_e1}} GAL-E1{{/if}}{{#if signals_used.beidou_b1}} BDS-B1{{/if}}{{#if signals_used.beidou_b2}} BDS-B2{{/if}}";

const VERSION_TEMPLATE: &str = r"VERSION #{{ or_na sequence }} {{ or_na gps_time }} ({{ or_na time_status }})
{{#each components}}  {{ component_type.label }}
    Model:    {{ model }}
    Serial:   {{ serial_number }}
    Hardware: {{ hardware_version }}
    Software: {{ software_version }}
    Boot:     {{ boot_version }}
    Compiled: {{ compile_date }} {{ compile_time }}
{{/each}}";
