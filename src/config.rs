use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::entities::{Coordinates, Region, TransportMode};
use crate::error::{invalid_input_error, Error};
use crate::external::{DynDirections, GoogleDirections, LocalDirections};
use crate::surface::Viewport;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_VIEWPORT: (f64, f64) = (390.0, 844.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionsBackend {
    Google,
    Local,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub directions: DirectionsBackend,
    pub transport_mode: TransportMode,
    pub viewport: (f64, f64),
    pub center: Coordinates,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = lookup("PINMAP_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into())
            .parse::<SocketAddr>()
            .map_err(|_| invalid_input_error())?;

        let directions = match lookup("PINMAP_DIRECTIONS").as_deref() {
            None | Some("local") => DirectionsBackend::Local,
            Some("google") => DirectionsBackend::Google,
            Some(_) => return Err(invalid_input_error()),
        };

        let transport_mode = match lookup("PINMAP_TRANSPORT_MODE") {
            Some(mode) => mode.parse()?,
            None => TransportMode::default(),
        };

        let viewport = match lookup("PINMAP_VIEWPORT") {
            Some(value) => parse_pair(&value)?,
            None => DEFAULT_VIEWPORT,
        };

        if viewport.0 <= 0.0 || viewport.1 <= 0.0 {
            return Err(invalid_input_error());
        }

        let center = match lookup("PINMAP_CENTER") {
            Some(value) => {
                let (latitude, longitude) = parse_pair(&value)?;
                Coordinates::new(latitude, longitude).validate()?
            }
            None => Coordinates::new(0.0, 0.0),
        };

        Ok(Self {
            listen_addr,
            directions,
            transport_mode,
            viewport,
            center,
        })
    }

    pub fn directions_provider(&self) -> Result<DynDirections, Error> {
        let provider: DynDirections = match self.directions {
            DirectionsBackend::Google => Arc::new(GoogleDirections::from_env()?),
            DirectionsBackend::Local => Arc::new(LocalDirections::new()),
        };

        Ok(provider)
    }

    pub fn viewport(&self) -> Viewport {
        let (width, height) = self.viewport;

        Viewport::new(width, height, Region::around(self.center))
    }
}

fn parse_pair(value: &str) -> Result<(f64, f64), Error> {
    let (first, second) = value.split_once(',').ok_or_else(invalid_input_error)?;

    let first = first.trim().parse().map_err(|_| invalid_input_error())?;
    let second = second.trim().parse().map_err(|_| invalid_input_error())?;

    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.directions, DirectionsBackend::Local);
        assert_eq!(config.transport_mode, TransportMode::Driving);
        assert_eq!(config.viewport, (390.0, 844.0));
        assert_eq!(config.center, Coordinates::new(0.0, 0.0));
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("PINMAP_LISTEN_ADDR", "0.0.0.0:8080"),
            ("PINMAP_DIRECTIONS", "google"),
            ("PINMAP_TRANSPORT_MODE", "Walking"),
            ("PINMAP_VIEWPORT", "200, 400"),
            ("PINMAP_CENTER", "37.33,-122.03"),
        ]))
        .unwrap();

        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.directions, DirectionsBackend::Google);
        assert_eq!(config.transport_mode, TransportMode::Walking);
        assert_eq!(config.viewport, (200.0, 400.0));
        assert_eq!(config.center, Coordinates::new(37.33, -122.03));

        let viewport = config.viewport();
        assert_eq!(viewport.region.center, config.center);
    }

    #[test]
    fn rejects_malformed_values() {
        for vars in [
            [("PINMAP_LISTEN_ADDR", "nowhere")],
            [("PINMAP_DIRECTIONS", "carrier-pigeon")],
            [("PINMAP_TRANSPORT_MODE", "flying")],
            [("PINMAP_VIEWPORT", "390")],
            [("PINMAP_VIEWPORT", "0,844")],
            [("PINMAP_CENTER", "91,0")],
        ] {
            let err = Config::from_lookup(lookup(&vars)).unwrap_err();
            assert_eq!(err, invalid_input_error(), "{:?}", vars);
        }
    }

    #[test]
    fn local_backend_needs_no_credentials() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert!(config.directions_provider().is_ok());
    }
}
