mod cli;
mod paths;
mod run;

use anyhow::{Context, Result};
use cli::{ColorArgs, Command, DecodeArgs, EncodeArgs, UniformsArgs};
use colors::{normalize_color, parse_color, Color};
use presetconfig::PresetLibrary;
use uniforms::{AnyParams, ShaderKind, UniformBag, UniformValue, PARAMS_BLOCK};
use urlstate::{decode_any, encode_any, format_number, link_state, link_with_state};

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    match cli.command {
        Command::Kinds => handle_kinds(),
        Command::Presets(args) => {
            let library = load_library(cli.preset_dir.as_deref())?;
            handle_presets(args.kind, &library)
        }
        Command::Uniforms(args) => {
            let library = load_library(cli.preset_dir.as_deref())?;
            handle_uniforms(args, &library)
        }
        Command::Encode(args) => {
            let library = load_library(cli.preset_dir.as_deref())?;
            handle_encode(args, &library)
        }
        Command::Decode(args) => handle_decode(args),
        Command::Color(args) => handle_color(args),
        Command::Layout(args) => handle_layout(args.kind),
    }
}

fn load_library(explicit: Option<&std::path::Path>) -> Result<PresetLibrary> {
    let dir = paths::preset_dir(explicit)?;
    paths::load_presets(&dir)
}

fn handle_kinds() -> Result<()> {
    for kind in ShaderKind::ALL {
        let mode = match kind.sizing_mode() {
            sizing::SizingMode::Object => "object",
            sizing::SizingMode::Pattern => "pattern",
        };
        let motion = if kind.is_animated() { "animated" } else { "static" };
        println!("{:<22} {mode:<8} {motion:<9} {}", kind.name(), kind.description());
    }
    Ok(())
}

fn handle_presets(kind: ShaderKind, library: &PresetLibrary) -> Result<()> {
    for name in kind.preset_names() {
        println!("{name}");
    }
    for preset in library.user_presets(kind) {
        println!("{} (user)", preset.name);
    }
    Ok(())
}

fn handle_uniforms(args: UniformsArgs, library: &PresetLibrary) -> Result<()> {
    let params = run::resolve_state(&args.state, library)?;
    let mut bag = params.to_uniforms();

    if let Some(surface) = args.surface {
        let surface = surface.with_pixel_ratio(args.pixel_ratio);
        let transform = sizing::resolve(params.sizing(), args.state.kind.sizing_mode(), surface);
        bag.insert_sizing_transform(&transform);
    }

    if args.json {
        let json = serde_json::to_string_pretty(&bag).context("failed to serialise uniforms")?;
        println!("{json}");
    } else {
        print_uniforms(&bag);
    }
    Ok(())
}

fn print_uniforms(bag: &UniformBag) {
    for (name, value) in bag.iter() {
        println!("{name:<20} {:<6} {}", value.glsl_type(), format_uniform(value));
    }
}

fn format_uniform(value: &UniformValue) -> String {
    let vector = |items: &[f32]| {
        let parts: Vec<_> = items.iter().map(|item| format_number(*item)).collect();
        format!("({})", parts.join(", "))
    };
    match value {
        UniformValue::Float(number) => format_number(*number),
        UniformValue::Int(number) => number.to_string(),
        UniformValue::Vec2(items) => vector(&items[..]),
        UniformValue::Vec4(items) => vector(&items[..]),
        UniformValue::Vec4Array(items) => {
            let parts: Vec<_> = items.iter().map(|item| vector(&item[..])).collect();
            format!("[{}]", parts.join(", "))
        }
    }
}

fn handle_encode(args: EncodeArgs, library: &PresetLibrary) -> Result<()> {
    let params = run::resolve_state(&args.state, library)?;
    let state = encode_any(&params);
    match args.link {
        Some(base) => {
            let link = link_with_state(&base, &state)
                .with_context(|| format!("failed to build a link from '{base}'"))?;
            println!("{link}");
        }
        None => println!("{state}"),
    }
    Ok(())
}

fn handle_decode(args: DecodeArgs) -> Result<()> {
    let input = args.input.trim();
    let state = if input.contains("://") {
        link_state(input).with_context(|| format!("failed to read link '{input}'"))?
    } else {
        input.to_string()
    };

    let params = decode_any(args.kind, &state);
    if args.json {
        let json = serde_json::to_string_pretty(&params).context("failed to serialise parameters")?;
        println!("{json}");
        return Ok(());
    }

    for pair in encode_any(&params).split('&') {
        println!("{pair}");
    }
    if let Some(preset) = params.matching_preset() {
        tracing::info!(kind = %args.kind, %preset, "state matches a built-in preset");
    }
    Ok(())
}

fn handle_color(args: ColorArgs) -> Result<()> {
    for input in &args.inputs {
        let color = if args.strict {
            parse_color(input).with_context(|| format!("failed to parse color '{input}'"))?
        } else {
            normalize_color(input.as_str())
        };
        println!("{input:<28} {}", describe_color(color));
    }
    Ok(())
}

fn describe_color(color: Color) -> String {
    let [r, g, b, a] = color.to_array();
    format!(
        "{:<10} {:<32} [{}, {}, {}, {}]",
        color.to_hex(),
        color.to_hsla_string(),
        format_number(r),
        format_number(g),
        format_number(b),
        format_number(a)
    )
}

fn handle_layout(kind: ShaderKind) -> Result<()> {
    let layout = kind.layout();
    print!("{}", layout.glsl_block(PARAMS_BLOCK));
    println!();
    for decl in layout.decls() {
        println!("// {:>4}  {}", decl.offset, decl.name);
    }
    println!("// size {} bytes", layout.size());

    let defaults = AnyParams::default_for(kind).to_uniforms();
    let bytes = defaults
        .to_std140(&layout)
        .with_context(|| format!("failed to pack default {kind} uniforms"))?;
    tracing::debug!(%kind, bytes = bytes.len(), "packed default uniforms");
    Ok(())
}
