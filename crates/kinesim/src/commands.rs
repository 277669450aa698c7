//! Subcommand implementations. Each writes its report to `out`.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use kinematics::{Motion, MotionParams};
use playback::{AnimationDescription, Readout, Simulator, Visualizer, normalize};
use raster::PixelCanvas;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::config::Settings;

/// Reads a JSON payload and normalizes it into a description.
pub fn load_description(path: &Path) -> Result<AnimationDescription> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let raw: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    normalize(&raw).ok_or_else(|| anyhow!("no animation available in {}", path.display()))
}

/// `kinesim run`: plays the description headless and reports readouts.
pub fn run(args: &RunArgs, out: &mut impl Write) -> Result<()> {
    let settings = Settings::resolve(args)?;
    let description = load_description(&args.file)?;

    let canvas = PixelCanvas::new(settings.surface.width, settings.surface.height)?;
    let mut vis = Visualizer::new(canvas, settings.animation.clone())?;
    let outcome = vis.load(description)?;
    if let Some(warning) = &outcome.warning {
        writeln!(out, "warning: {warning}")?;
    }

    match args.step {
        Some(index) => vis
            .play_step(index)
            .with_context(|| format!("cannot play solution step {index}"))?,
        None => {
            vis.play();
        }
    }

    let mut sim = Simulator::new(vis);
    let mut periodic = Vec::new();
    sim.run_with(settings.max_ticks(), |vis, tick| {
        if args.every.is_some_and(|every| tick % every == 0) {
            if let Some(readout) = vis.readout() {
                periodic.push(readout);
            }
        }
    });
    for readout in &periodic {
        write_readout(out, readout, args.json, false)?;
    }

    let stats = sim.stats().clone();
    if stats.hit_tick_limit {
        warn!(
            run.max_seconds = settings.run.max_seconds,
            "Run cut off while still playing"
        );
    }

    let vis = sim.into_visualizer();
    let readout = vis
        .readout()
        .ok_or_else(|| anyhow!("no animation loaded"))?;
    write_readout(out, &readout, args.json, true)?;

    if let Some(path) = &args.export {
        let frame = vis.export_frame()?;
        fs::write(path, &frame.bytes)
            .with_context(|| format!("failed to write frame to {}", path.display()))?;
        info!(path = %path.display(), bytes = frame.bytes.len(), "Frame exported");
    }

    info!(
        subtype = %outcome.kind,
        ticks = stats.ticks,
        end_reason = ?stats.end_reason,
        time = readout.time,
        "Run complete"
    );
    Ok(())
}

fn write_readout(out: &mut impl Write, readout: &Readout, as_json: bool, last: bool) -> Result<()> {
    if as_json {
        let text = if last {
            serde_json::to_string_pretty(readout)?
        } else {
            serde_json::to_string(readout)?
        };
        writeln!(out, "{text}")?;
        return Ok(());
    }

    writeln!(
        out,
        "t={:.3}s state={} x={:.3}m y={:.3}m v={:.3}m/s",
        readout.time, readout.state, readout.position.x, readout.position.y, readout.speed,
    )?;
    if !last {
        return Ok(());
    }
    if let Some(reason) = readout.end_reason {
        writeln!(out, "ended: {reason}")?;
    }
    for point in &readout.key_points {
        writeln!(
            out,
            "{}: x={:.3}m y={:.3}m t={:.3}s",
            point.label, point.position.x, point.position.y, point.data.time
        )?;
    }
    if let Some(summary) = &readout.projectile {
        writeln!(
            out,
            "range={:.3}m h_max={:.3}m t_land={:.3}s",
            summary.range, summary.h_max, summary.t_land
        )?;
    }
    if let Some(circular) = &readout.circular {
        writeln!(
            out,
            "Fc={:.3}N f_max={:.3}N sustainable={}",
            circular.centripetal_force, circular.max_friction, circular.sustainable
        )?;
    }
    Ok(())
}

/// `kinesim normalize`: prints the normalized description.
pub fn normalize_file(path: &Path, out: &mut impl Write) -> Result<()> {
    let description = load_description(path)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&description)?)?;
    Ok(())
}

/// `kinesim summary`: prints the analytic facts of the described model.
pub fn summary(path: &Path, out: &mut impl Write) -> Result<()> {
    let description = load_description(path)?;
    let resolved = description.resolve()?;
    let report = summarize(&resolved.params, resolved.warning.as_deref())?;
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

fn summarize(params: &MotionParams, warning: Option<&str>) -> Result<Value> {
    let extent = params.predicted_extent()?;
    let motion = params.build()?;
    let facts = match &motion {
        Motion::FreeFall(m) => json!({
            "first_impact_time": m.first_impact_time(),
            "end_time": m.end_time(),
            "bounces": m.bounce_count(),
        }),
        Motion::Projectile(m) => serde_json::to_value(m.summary())?,
        Motion::Uniform(m) => json!({
            "velocity": m.velocity(),
            "duration": m.params().duration,
        }),
        Motion::UniformAcceleration(m) => json!({
            "normal_force": m.normal_force(),
            "friction_force": m.friction_force(),
            "acceleration": m.acceleration(),
        }),
        Motion::UniformCircular(m) => {
            let mut facts = json!({
                "speed": m.speed(),
                "centripetal_force": m.centripetal_force(),
                "max_friction": m.max_friction(),
                "sustainable": m.is_sustainable(),
            });
            // Without an explicit center the position depends on the surface.
            if m.params().has_center() {
                facts["center"] = json!(m.center());
            }
            facts
        }
    };

    Ok(json!({
        "subtype": motion.kind(),
        "warning": warning,
        "parameters": params,
        "predicted_extent": extent,
        "facts": facts,
    }))
}
