//! GLOSA advisory calculator
//!
//! Turns a distance to the stop line and the phase window reported by the
//! predictor into a recommended approach speed. Pure and allocation-light:
//! no state, no I/O.
//!
//! Policy per phase:
//! - GREEN: arrive before the light turns red (`distance / seconds`)
//! - RED/AMBER: arrive no earlier than the light turns green
//! - IDLE or unusable timing: no numeric recommendation

use crate::types::{Advisory, AdvisoryKind, SignalPhase, SpeedBounds};

/// m/s to km/h
const MS_TO_KMH: f64 = 3.6;

/// Compute the advisory for a vehicle `distance_m` meters from the stop line
pub fn advise(
    distance_m: f64,
    phase: SignalPhase,
    seconds_to_change: Option<f64>,
    bounds: &SpeedBounds,
) -> Advisory {
    let seconds = match seconds_to_change {
        Some(s) if s.is_finite() && s >= 0.0 => s,
        _ => return synchronizing(),
    };
    if !distance_m.is_finite() || distance_m < 0.0 {
        return synchronizing();
    }

    match phase {
        SignalPhase::Idle => synchronizing(),
        SignalPhase::Green => advise_green(distance_m, seconds, bounds),
        SignalPhase::Red | SignalPhase::Amber => advise_red(distance_m, seconds, bounds),
    }
}

fn advise_green(distance_m: f64, seconds: f64, bounds: &SpeedBounds) -> Advisory {
    if seconds == 0.0 {
        let speed = bounds.min_kmh();
        return advisory(
            speed,
            AdvisoryKind::SignalChanging,
            format!("Signal is changing now. Slow to {} km/h and prepare to stop.", format_speed(speed)),
        );
    }

    let required = distance_m / seconds * MS_TO_KMH;

    if required < bounds.min_kmh() {
        let speed = bounds.cruise_kmh();
        advisory(
            speed,
            AdvisoryKind::AmpleTime,
            format!("Ample green time. Cruise at {} km/h, no need to rush.", format_speed(speed)),
        )
    } else if required > bounds.max_kmh() {
        let speed = bounds.max_kmh();
        advisory(
            speed,
            AdvisoryKind::ExpectStop,
            format!(
                "Green ends before you can reach the junction within {} km/h. Expect to stop.",
                format_speed(speed)
            ),
        )
    } else {
        let speed = bounds.clamp(required.round());
        advisory(
            speed,
            AdvisoryKind::GreenWave,
            format!("Maintain {} km/h to pass on green. Green wave achievable.", format_speed(speed)),
        )
    }
}

fn advise_red(distance_m: f64, seconds: f64, bounds: &SpeedBounds) -> Advisory {
    if seconds == 0.0 {
        let speed = bounds.min_kmh();
        return advisory(
            speed,
            AdvisoryKind::SignalChanging,
            format!("Signal is changing now. Proceed with caution at {} km/h.", format_speed(speed)),
        );
    }

    let max_safe = distance_m / seconds * MS_TO_KMH;

    if max_safe < bounds.min_kmh() {
        let speed = bounds.min_kmh();
        advisory(
            speed,
            AdvisoryKind::PrepareToStop,
            format!(
                "You will reach the junction before green. Slow to {} km/h and prepare to stop.",
                format_speed(speed)
            ),
        )
    } else {
        let speed = bounds.clamp(max_safe.round());
        advisory(
            speed,
            AdvisoryKind::EaseOff,
            format!("Ease off to {} km/h to arrive as the signal turns green.", format_speed(speed)),
        )
    }
}

fn advisory(speed_kmh: f64, kind: AdvisoryKind, message: String) -> Advisory {
    Advisory {
        recommended_speed_kmh: Some(speed_kmh),
        kind,
        message,
    }
}

fn synchronizing() -> Advisory {
    Advisory {
        recommended_speed_kmh: None,
        kind: AdvisoryKind::Synchronizing,
        message: "Advisory system is synchronizing with the signal. Drive according to conditions."
            .to_string(),
    }
}

fn format_speed(speed_kmh: f64) -> String {
    if speed_kmh.fract() == 0.0 {
        format!("{:.0}", speed_kmh)
    } else {
        format!("{:.1}", speed_kmh)
    }
}
