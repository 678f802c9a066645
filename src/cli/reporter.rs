// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::ast::PrimitiveDescriptor;
use crate::geometry::BoundingBox;
use crate::kernel::Preview;
use crate::scene::CameraFrame;
use colored::*;
use nalgebra::Point3;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a preview: objects, warnings, bounds and camera
    pub fn report_preview(file: &str, preview: &Preview, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Preview:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        if preview.used_placeholder() {
            println!(
                "{} {}",
                "⚠️ ".yellow(),
                "No primitives recognized, showing placeholder".yellow().bold()
            );
        } else {
            println!(
                "{} {}",
                "✅".green(),
                format!("{} primitives recognized", preview.scene.len()).green().bold()
            );
        }

        println!("\n{}", "Objects:".bold());
        for object in &preview.scene.objects {
            let material = preview.scene.material(object);
            println!(
                "  {} {} {} {}",
                format!("#{}", object.index).bright_black(),
                object.descriptor.kind().to_string().cyan(),
                Self::format_dimensions(&object.descriptor),
                material.hex().bright_black()
            );
        }

        if !preview.warnings.is_empty() {
            println!("\n{}", "Warnings:".bold());
            for warning in &preview.warnings {
                println!("  {} {}", "•".yellow(), warning);
            }
        }

        println!("\n{}", "Scene:".bold());
        Self::print_field("Vertices", &preview.scene.vertex_count().to_string());
        Self::print_field("Triangles", &preview.scene.triangle_count().to_string());
        if let Some(bounds) = preview.bounds() {
            Self::print_field("Bounds", &Self::format_bounds(&bounds));
        }
        if let Some(camera) = &preview.camera {
            Self::print_field("Camera", &Self::format_camera(camera));
        }
        Self::print_field("Time", &Self::format_duration(duration));

        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        eprintln!("{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn print_field(name: &str, value: &str) {
        println!("  {} {}", format!("{}:", name).bright_black(), value.cyan());
    }

    fn format_dimensions(descriptor: &PrimitiveDescriptor) -> String {
        descriptor
            .dimensions()
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn format_point(p: &Point3<f64>) -> String {
        format!("({:.3}, {:.3}, {:.3})", p.x, p.y, p.z)
    }

    fn format_bounds(bounds: &BoundingBox) -> String {
        format!(
            "{} to {}",
            Self::format_point(&bounds.min),
            Self::format_point(&bounds.max)
        )
    }

    fn format_camera(camera: &CameraFrame) -> String {
        format!(
            "at {} looking at {}, fit distance {:.4}",
            Self::format_point(&camera.position),
            Self::format_point(&camera.target),
            camera.distance
        )
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
