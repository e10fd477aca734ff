use medusa::{MindmapConfig, MindmapSession, NodeId, Outline, SessionState};
use medusa_render::layout::layout_radial;
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Outline(medusa::CoreError),
    Render(medusa::RenderError),
    Gen(medusa_gen::Error),
    UnknownNode(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Outline(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Gen(err) => write!(f, "{err}"),
            CliError::UnknownNode(name) => write!(f, "No node matches {name:?}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<medusa::CoreError> for CliError {
    fn from(value: medusa::CoreError) -> Self {
        Self::Outline(value)
    }
}

impl From<medusa::RenderError> for CliError {
    fn from(value: medusa::RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<medusa_gen::Error> for CliError {
    fn from(value: medusa_gen::Error) -> Self {
        Self::Gen(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Validate,
    Layout,
    Render,
    Generate,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    /// Input path for validate/layout/render; topic words for generate.
    inputs: Vec<String>,
    pretty: bool,
    radius: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    wrap_width: Option<f64>,
    root_color: Option<String>,
    collapse: Vec<String>,
    diagram_id: Option<String>,
    background: Option<String>,
    model: Option<String>,
    render_after_generate: bool,
    out: Option<String>,
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    id: NodeId,
    name: &'a str,
    depth: usize,
    angle: f64,
    radius: f64,
    x: f64,
    y: f64,
}

fn usage() -> &'static str {
    "medusa-cli\n\
\n\
USAGE:\n\
  medusa-cli [validate] [--pretty] [<path>|-]\n\
  medusa-cli layout [--pretty] [--radius <px>] [--collapse <id|name>[,...]] [<path>|-]\n\
  medusa-cli render [--out <path>] [--width <px>] [--height <px>] [--wrap-width <px>]\n\
                    [--root-color <#rrggbb>] [--collapse <id|name>[,...]] [--id <diagram-id>]\n\
                    [--background <css-color>] [<path>|-]\n\
  medusa-cli generate [--model <id>] [--render] [--out <path>] <topic...>\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the outline JSON is read from stdin.\n\
  - validate prints the normalized outline JSON; layout prints one record per visible node.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - --collapse toggles the named nodes before layout/render (numeric ids as printed by layout,\n\
    or exact node names).\n\
  - generate requires GEMINI_API_KEY in the environment (a .env file is honored) and prints the\n\
    generated outline JSON unless --render is given.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut it = argv.iter().skip(1).peekable();
    let mut command_set = false;
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "validate" | "layout" | "render" | "generate" if !command_set => {
                command_set = true;
                args.command = match a.as_str() {
                    "validate" => Command::Validate,
                    "layout" => Command::Layout,
                    "render" => Command::Render,
                    _ => Command::Generate,
                };
            }
            "--pretty" => args.pretty = true,
            "--render" => args.render_after_generate = true,
            "--radius" => args.radius = Some(next_f64(&mut it)?),
            "--width" => args.width = Some(next_f64(&mut it)?),
            "--height" => args.height = Some(next_f64(&mut it)?),
            "--wrap-width" => args.wrap_width = Some(next_f64(&mut it)?),
            "--root-color" => {
                let Some(color) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.root_color = Some(color.trim().to_string());
            }
            "--collapse" => {
                let Some(list) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.collapse.extend(
                    list.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                );
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--model" => {
                let Some(model) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.model = Some(model.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            value => args.inputs.push(value.to_string()),
        }
    }

    match args.command {
        Command::Generate => {
            if args.inputs.is_empty() {
                return Err(CliError::Usage(usage()));
            }
        }
        _ => {
            if args.inputs.len() > 1 {
                return Err(CliError::Usage(usage()));
            }
        }
    }

    Ok(args)
}

fn next_f64(
    it: &mut std::iter::Peekable<impl Iterator<Item = impl AsRef<str>>>,
) -> Result<f64, CliError> {
    let Some(raw) = it.next() else {
        return Err(CliError::Usage(usage()));
    };
    let value = raw
        .as_ref()
        .parse::<f64>()
        .map_err(|_| CliError::Usage(usage()))?;
    if !(value.is_finite() && value > 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(value)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn config_from(args: &Args) -> MindmapConfig {
    let mut config = MindmapConfig::default();
    if let Some(width) = args.width {
        config.diagram_width = width;
    }
    if let Some(height) = args.height {
        config.diagram_height = height;
    }
    if let Some(wrap_width) = args.wrap_width {
        config.wrap_width = wrap_width;
    }
    if let Some(color) = &args.root_color {
        config.root_color = color.clone();
    }
    config
}

fn resolve_node(tree: &medusa::MindmapTree, key: &str) -> Result<NodeId, CliError> {
    if let Ok(index) = key.parse::<usize>() {
        if tree.get(NodeId(index)).is_some() {
            return Ok(NodeId(index));
        }
    }
    tree.find_by_name(key)
        .ok_or_else(|| CliError::UnknownNode(key.to_string()))
}

fn load_outline(args: &Args) -> Result<Outline, CliError> {
    let text = read_input(args.inputs.first().map(String::as_str))?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    Ok(Outline::from_value(&value)?)
}

fn render_session(args: &Args, outline: Outline) -> Result<String, CliError> {
    let config = config_from(args);
    let mut session = MindmapSession::new(config)?;
    session.set_outline(Some(outline));
    debug_assert_eq!(session.state(), SessionState::Ready);

    for key in &args.collapse {
        let tree = session.tree().expect("session is ready");
        let id = resolve_node(tree, key)?;
        session.toggle_node(id);
    }

    let mut options = session.svg_options();
    options.diagram_id = args.diagram_id.clone();
    options.background = args.background.clone();
    let scene = session.scene().expect("session is ready");
    let viewport = session.viewport().expect("session is ready");
    Ok(medusa_render::svg::render_scene_svg(
        scene, viewport, None, &options,
    ))
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Validate => {
            let outline = load_outline(&args)?;
            write_json(&outline, args.pretty)
        }
        Command::Layout => {
            let outline = load_outline(&args)?;
            let mut tree = medusa::MindmapTree::build(&outline);
            for key in &args.collapse {
                let id = resolve_node(&tree, key)?;
                tree.toggle(id);
            }
            let radius = args
                .radius
                .unwrap_or_else(|| MindmapConfig::default().canvas_radius());
            let layout = layout_radial(&tree, radius);
            let records: Vec<LayoutOut<'_>> = layout
                .iter()
                .map(|(id, point)| LayoutOut {
                    id,
                    name: tree.node(id).name.as_str(),
                    depth: tree.node(id).depth,
                    angle: point.angle,
                    radius: point.radius,
                    x: point.x,
                    y: point.y,
                })
                .collect();
            write_json(&records, args.pretty)
        }
        Command::Render => {
            let outline = load_outline(&args)?;
            let svg = render_session(&args, outline)?;
            write_text(&svg, args.out.as_deref())
        }
        Command::Generate => {
            // The API key may live in a .env file next to the invocation.
            dotenvy::dotenv().ok();
            let mut config = medusa_gen::GenConfig::from_env()?;
            if let Some(model) = &args.model {
                config = config.with_model(model.clone());
            }
            let client = medusa_gen::OutlineClient::new(config);
            let topic = args.inputs.join(" ");

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            let outline = runtime.block_on(client.generate(&topic))?;

            if args.render_after_generate {
                let svg = render_session(&args, outline)?;
                write_text(&svg, args.out.as_deref())
            } else {
                match args.out.as_deref() {
                    None => write_json(&outline, args.pretty),
                    Some(path) => {
                        let text = if args.pretty {
                            serde_json::to_string_pretty(&outline)?
                        } else {
                            serde_json::to_string(&outline)?
                        };
                        Ok(std::fs::write(path, text)?)
                    }
                }
            }
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
