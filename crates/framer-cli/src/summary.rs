use std::time::Duration;

use console::Style;
use framer_core::asset::ImageAsset;
use framer_core::config::FramerConfig;
use framer_core::delivery::DeliveryReport;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    warning: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            warning: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_export_summary(
    config: &FramerConfig,
    subject: &ImageAsset,
    report: &DeliveryReport,
    elapsed: Duration,
) {
    let s = Styles::new();
    let view = config.viewport.snapshot();

    println!();
    println!("  {}", s.title.apply_to("Framer Export"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(13)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Frame"),
        s.path.apply_to(config.frame.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Subject"),
        s.value
            .apply_to(format!("{}x{}", subject.width(), subject.height()))
    );
    println!();

    println!("  {}", s.header.apply_to("Transform"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Scale"),
        s.value.apply_to(format!("{:.2}", view.scale))
    );
    if view.effective_scale() != view.scale {
        println!(
            "    {:<12}{}",
            "",
            s.warning
                .apply_to(format!("rendered at {:.2}", view.effective_scale()))
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Rotation"),
        s.value.apply_to(format!("{:.0}\u{00b0}", view.rotation_degrees))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Pan"),
        s.value
            .apply_to(format!("{:+.3}, {:+.3}", view.pan_x, view.pan_y))
    );
    println!();

    println!("  {}", s.header.apply_to("Delivery"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Method"),
        s.method.apply_to(report.method)
    );
    for failure in &report.failures {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Skipped"),
            s.warning.apply_to(failure)
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Size"),
        s.value
            .apply_to(format!("{:.1} KB", report.bytes as f64 / 1024.0))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output_path().display())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Time"),
        s.value.apply_to(format!("{:.2}s", elapsed.as_secs_f64()))
    );
    println!();
}
