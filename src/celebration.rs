//! Confetti
//!
//! The page celebrates a guest book signature and every excitement click with
//! a confetti animation. Rendering is done by the browser; the server only
//! decides which bursts to fire and hands them to a [`Celebration`].

use serde::{Deserialize, Serialize};

/// Total particles across one excitement volley
const VOLLEY_PARTICLES: f64 = 200.0;

/// Launch point, as fractions of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    pub y: f64,
}

/// Parameters for one confetti burst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfettiBurst {
    pub particle_count: u32,
    pub spread: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_velocity: Option<f64>,
    pub origin: Origin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<u32>,
}

impl ConfettiBurst {
    pub fn new(particle_count: u32, spread: f64, origin_y: f64) -> Self {
        Self {
            particle_count,
            spread,
            start_velocity: None,
            origin: Origin { x: None, y: origin_y },
            decay: None,
            scalar: None,
            colors: None,
            z_index: None,
        }
    }

    pub fn start_velocity(mut self, velocity: f64) -> Self {
        self.start_velocity = Some(velocity);
        self
    }

    pub fn decay(mut self, decay: f64) -> Self {
        self.decay = Some(decay);
        self
    }

    pub fn scalar(mut self, scalar: f64) -> Self {
        self.scalar = Some(scalar);
        self
    }

    pub fn colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    pub fn z_index(mut self, z_index: u32) -> Self {
        self.z_index = Some(z_index);
        self
    }
}

/// Five staggered bursts fired on each excitement click
pub fn excitement_volley() -> Vec<ConfettiBurst> {
    let part = |ratio: f64, spread: f64| {
        ConfettiBurst::new((VOLLEY_PARTICLES * ratio).floor() as u32, spread, 0.7).z_index(9999)
    };

    vec![
        part(0.25, 26.0).start_velocity(55.0),
        part(0.2, 60.0),
        part(0.35, 100.0).decay(0.91).scalar(0.8),
        part(0.1, 120.0).start_velocity(25.0).decay(0.92).scalar(1.2),
        part(0.1, 120.0).start_velocity(45.0),
    ]
}

/// Single burst fired when the guest book is signed
pub fn guest_book_burst() -> ConfettiBurst {
    ConfettiBurst::new(100, 70.0, 0.6)
}

/// Something able to play confetti for whoever is watching
pub trait Celebration: Send + Sync {
    fn celebrate(&self, bursts: &[ConfettiBurst]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volley_particle_split() {
        let volley = excitement_volley();
        let counts: Vec<u32> = volley.iter().map(|b| b.particle_count).collect();

        assert_eq!(counts, vec![50, 40, 70, 20, 20]);
        assert!(volley.iter().all(|b| b.origin.y == 0.7));
        assert!(volley.iter().all(|b| b.z_index == Some(9999)));
    }

    #[test]
    fn test_volley_shapes() {
        let volley = excitement_volley();

        assert_eq!(volley[0].start_velocity, Some(55.0));
        assert_eq!(volley[2].decay, Some(0.91));
        assert_eq!(volley[2].scalar, Some(0.8));
        assert_eq!(volley[3].scalar, Some(1.2));
        assert_eq!(volley[4].spread, 120.0);
    }

    #[test]
    fn test_guest_book_burst_json() {
        let json = serde_json::to_value(guest_book_burst()).unwrap();

        assert_eq!(json["particleCount"], 100);
        assert_eq!(json["spread"], 70.0);
        assert_eq!(json["origin"]["y"], 0.6);
        assert!(json.get("decay").is_none());
        assert!(json["origin"].get("x").is_none());
    }

    #[test]
    fn test_colors_builder() {
        let burst = ConfettiBurst::new(10, 45.0, 0.5).colors(["#667eea", "#764ba2"]);
        assert_eq!(
            burst.colors,
            Some(vec!["#667eea".to_string(), "#764ba2".to_string()])
        );
    }
}
