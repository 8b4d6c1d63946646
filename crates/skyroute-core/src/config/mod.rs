use crate::error::{Error, Result};
use serde_json::{Map, Value, json};
use std::time::Duration;

/// Scene configuration: built-in defaults with user overrides deep-merged on top.
///
/// Keys are camelCase and addressed by dotted paths (`"forces.linkDistance"`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config(Value);

impl Default for Config {
    fn default() -> Self {
        Self(Self::defaults())
    }
}

impl Config {
    fn defaults() -> Value {
        json!({
            "viewport": { "width": 640, "height": 480 },
            "forces": {
                "linkDistance": 25,
                "chargeStrength": -1,
                "centerStrength": 1
            },
            "simulation": {
                "alphaMin": 0.001,
                "alphaRestart": 0.3,
                "velocityDecay": 0.4,
                "randomSeed": 1
            },
            "transition": { "nodeMs": 600, "overlayMs": 500 },
            "tooltip": { "offsetY": 80 },
            "node": { "passengersPerPixel": 3000000 },
            "topology": { "object": "countries" }
        })
    }

    /// Parses user overrides and merges them over the defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let overrides: Value = serde_json::from_str(text).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        Self::from_overrides(&overrides)
    }

    pub fn from_overrides(overrides: &Value) -> Result<Self> {
        if !overrides.is_object() {
            return Err(Error::InvalidConfig {
                message: "config overrides must be a JSON object".to_string(),
            });
        }
        let mut cfg = Self::default();
        cfg.deep_merge(overrides);
        Ok(cfg)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    pub fn get_u64(&self, dotted_path: &str) -> Option<u64> {
        self.get(dotted_path)?.as_u64()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    fn require_f64(&self, dotted_path: &str) -> Result<f64> {
        self.get_f64(dotted_path)
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::InvalidConfig {
                message: format!("`{dotted_path}` must be a finite number"),
            })
    }

    fn require_positive(&self, dotted_path: &str) -> Result<f64> {
        let v = self.require_f64(dotted_path)?;
        if v <= 0.0 {
            return Err(Error::InvalidConfig {
                message: format!("`{dotted_path}` must be positive, got {v}"),
            });
        }
        Ok(v)
    }

    fn require_u64(&self, dotted_path: &str) -> Result<u64> {
        self.get_u64(dotted_path)
            .ok_or_else(|| Error::InvalidConfig {
                message: format!("`{dotted_path}` must be a non-negative integer"),
            })
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

/// Typed view over a [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOptions {
    pub width: f64,
    pub height: f64,
    pub link_distance: f64,
    pub charge_strength: f64,
    pub center_strength: f64,
    pub alpha_min: f64,
    pub alpha_restart: f64,
    pub velocity_decay: f64,
    pub random_seed: u64,
    pub node_transition: Duration,
    pub overlay_transition: Duration,
    pub tooltip_offset_y: f64,
    pub passengers_per_pixel: f64,
    pub topology_object: String,
}

impl SceneOptions {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let velocity_decay = cfg.require_f64("simulation.velocityDecay")?;
        if !(0.0..=1.0).contains(&velocity_decay) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "`simulation.velocityDecay` must be within [0, 1], got {velocity_decay}"
                ),
            });
        }
        let alpha_min = cfg.require_positive("simulation.alphaMin")?;
        let alpha_restart = cfg.require_positive("simulation.alphaRestart")?;
        if alpha_restart <= alpha_min {
            return Err(Error::InvalidConfig {
                message: format!(
                    "`simulation.alphaRestart` ({alpha_restart}) must exceed \
                     `simulation.alphaMin` ({alpha_min})"
                ),
            });
        }
        let topology_object = cfg
            .get_str("topology.object")
            .ok_or_else(|| Error::InvalidConfig {
                message: "`topology.object` must be a string".to_string(),
            })?
            .to_string();

        Ok(Self {
            width: cfg.require_positive("viewport.width")?,
            height: cfg.require_positive("viewport.height")?,
            link_distance: cfg.require_f64("forces.linkDistance")?.max(0.0),
            charge_strength: cfg.require_f64("forces.chargeStrength")?,
            center_strength: cfg.require_f64("forces.centerStrength")?,
            alpha_min,
            alpha_restart,
            velocity_decay,
            random_seed: cfg.require_u64("simulation.randomSeed")?,
            node_transition: Duration::from_millis(cfg.require_u64("transition.nodeMs")?),
            overlay_transition: Duration::from_millis(cfg.require_u64("transition.overlayMs")?),
            tooltip_offset_y: cfg.require_f64("tooltip.offsetY")?,
            passengers_per_pixel: cfg.require_positive("node.passengersPerPixel")?,
            topology_object,
        })
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl Default for SceneOptions {
    fn default() -> Self {
        // The built-in defaults always satisfy the checks in `from_config`.
        match Self::from_config(&Config::default()) {
            Ok(opts) => opts,
            Err(e) => unreachable!("built-in scene defaults are invalid: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, SceneOptions};
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn defaults_match_the_airport_scene() {
        let opts = SceneOptions::default();
        assert_eq!((opts.width, opts.height), (640.0, 480.0));
        assert_eq!(opts.center(), (320.0, 240.0));
        assert_eq!(opts.link_distance, 25.0);
        assert_eq!(opts.charge_strength, -1.0);
        assert_eq!(opts.node_transition, Duration::from_millis(600));
        assert_eq!(opts.overlay_transition, Duration::from_millis(500));
        assert_eq!(opts.topology_object, "countries");
    }

    #[test]
    fn overrides_are_deep_merged() {
        let cfg = Config::from_json_str(r#"{ "viewport": { "width": 1000 } }"#).unwrap();
        assert_eq!(cfg.get_f64("viewport.width"), Some(1000.0));
        assert_eq!(cfg.get_f64("viewport.height"), Some(480.0));
    }

    #[test]
    fn set_value_creates_intermediate_objects() {
        let mut cfg = Config::default();
        cfg.set_value("forces.extra.depth", json!(3));
        assert_eq!(cfg.get_u64("forces.extra.depth"), Some(3));
        assert_eq!(cfg.get_f64("forces.linkDistance"), Some(25.0));
    }

    #[test]
    fn wrong_types_are_reported_by_path() {
        let cfg = Config::from_json_str(r#"{ "viewport": { "width": "wide" } }"#).unwrap();
        let err = SceneOptions::from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("viewport.width"), "{err}");
    }

    #[test]
    fn restart_alpha_must_exceed_stop_threshold() {
        let cfg = Config::from_json_str(r#"{ "simulation": { "alphaMin": 0.5 } }"#).unwrap();
        let err = SceneOptions::from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("alphaRestart"), "{err}");

        let cfg = Config::from_json_str(r#"{ "simulation": { "alphaRestart": 0.001 } }"#).unwrap();
        assert!(SceneOptions::from_config(&cfg).is_err());

        let cfg = Config::from_json_str(r#"{ "simulation": { "alphaMin": 0.01 } }"#).unwrap();
        assert!(SceneOptions::from_config(&cfg).is_ok());
    }

    #[test]
    fn non_object_overrides_are_rejected() {
        assert!(Config::from_json_str("[1, 2]").is_err());
        assert!(Config::from_json_str("{ not json").is_err());
    }
}
