// Allow unused code for designed-but-not-yet-used APIs
// Remove these as the codebase matures
#![allow(dead_code)]

mod control;
mod demos;
mod display;
mod mqtt;
mod palette;
mod raster;
mod util;

use control::{Command, Controller};
use demos::{Demo, Mosaic, Orbits, Testcard};
use display::{Display, InputEvent, RenderTarget, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use mqtt::MqttClient;
use palette::Palette;
use raster::{Context, Surface};
use sdl2::keyboard::Keycode;
use util::FpsCounter;

struct Options {
    width: u32,
    height: u32,
    vsync: bool,
    palette_path: Option<String>,
    mqtt_host: Option<String>,
    mqtt_topic: String,
}

/// Parse command line arguments
fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options {
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        vsync: true,
        palette_path: None,
        mqtt_host: None,
        mqtt_topic: MqttClient::default_topic().to_string(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => options.vsync = false,
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        options.width = w;
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        options.height = h;
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 1920x1080)
                    let parts: Vec<&str> = args[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                            options.width = w;
                            options.height = h;
                        }
                    }
                    i += 1;
                }
            },
            "--palette" | "-p" => {
                if i + 1 < args.len() {
                    options.palette_path = Some(args[i + 1].clone());
                    i += 1;
                }
            },
            "--mqtt" => {
                if i + 1 < args.len() {
                    options.mqtt_host = Some(args[i + 1].clone());
                    i += 1;
                }
            },
            "--topic" => {
                if i + 1 < args.len() {
                    options.mqtt_topic = args[i + 1].clone();
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: tessera [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --width W, -w W       Set window width (default: {})",
                    DEFAULT_WIDTH
                );
                println!(
                    "  --height H, -h H      Set window height (default: {})",
                    DEFAULT_HEIGHT
                );
                println!("  --resolution WxH, -r WxH  Set resolution (e.g., 1920x1080)");
                println!("  --palette FILE, -p FILE   Load a JSON palette");
                println!("  --mqtt HOST           Connect to an MQTT broker for remote control");
                println!("  --topic TOPIC         MQTT topic to subscribe to (default: tessera)");
                println!("  --no-vsync            Disable VSync for uncapped framerate");
                println!("  --help                Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    options
}

fn main() -> Result<(), String> {
    let options = parse_args();

    let (mut display, texture_creator) =
        Display::with_options("tessera", options.width, options.height, options.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, options.width, options.height)?;

    let palette = match &options.palette_path {
        Some(path) => Palette::load(path)?,
        None => Palette::default(),
    };

    let mut surface = Surface::new(options.width as i32, options.height as i32)?;
    let mut ctx = Context::new(&mut surface);

    let width = ctx.width();
    let height = ctx.height();
    let mut demo_list: Vec<Box<dyn Demo>> = vec![
        Box::new(Testcard::new()),              // 1
        Box::new(Orbits::new(width, height)),   // 2
        Box::new(Mosaic::new(width, height)),   // 3
    ];
    let mut current = 0usize;

    let controller = match Controller::new() {
        Ok(controller) => Some(controller),
        Err(e) => {
            eprintln!("Remote control disabled: {}", e);
            None
        },
    };
    let mqtt_client = match &options.mqtt_host {
        Some(host) => Some(MqttClient::new(host, &options.mqtt_topic)?),
        None => None,
    };

    // FPS counter with 60 sample rolling average
    let mut fps_counter = FpsCounter::new(60);
    let mut show_fps = false;

    println!("=== tessera ===");
    println!("Resolution: {}x{}", options.width, options.height);
    if options.vsync {
        println!("VSync: ON (60fps locked). Use --no-vsync for uncapped.");
    } else {
        println!("VSync: OFF (uncapped framerate)");
    }
    println!("Use --help for command line options.");
    println!("Controls:");
    println!("  Left/Right - Cycle through demos");
    println!("  1          - Test Card");
    println!("  2          - Orbits");
    println!("  3          - Mosaic");
    println!("  F          - Toggle FPS in window title");
    println!("  Escape     - Quit");
    if controller.is_some() {
        println!();
        println!(
            "Remote: echo next | nc -U {}  (also: prev, fps, quit, demo N)",
            Controller::socket_path()
        );
    }

    'main: loop {
        // Delta time and FPS measurement
        let (dt, _current_fps, avg_fps) = fps_counter.tick();

        let mut commands: Vec<Command> = Vec::new();
        for event in display.poll_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::KeyDown(key) => match key {
                    Keycode::Escape => commands.push(Command::Quit),
                    Keycode::Left => commands.push(Command::Left),
                    Keycode::Right => commands.push(Command::Right),
                    Keycode::F => commands.push(Command::ToggleFps),
                    Keycode::Num1 => commands.push(Command::Demo(0)),
                    Keycode::Num2 => commands.push(Command::Demo(1)),
                    Keycode::Num3 => commands.push(Command::Demo(2)),
                    _ => {},
                },
                _ => {},
            }
        }
        if let Some(controller) = &controller {
            commands.extend(controller.poll());
        }
        if let Some(client) = &mqtt_client {
            commands.extend(client.poll());
        }

        for command in commands {
            match command {
                Command::Left => {
                    current = if current == 0 {
                        demo_list.len() - 1
                    } else {
                        current - 1
                    };
                },
                Command::Right => current = (current + 1) % demo_list.len(),
                Command::ToggleFps => show_fps = !show_fps,
                Command::Quit => break 'main,
                Command::Demo(n) => {
                    if n < demo_list.len() {
                        current = n;
                    }
                },
            }
        }

        let demo = &mut demo_list[current];
        demo.update(dt, width, height);

        // Fresh region and pipeline each frame; the demo sets up what it needs
        ctx.reset_clipping();
        ctx.reset_shifting();
        ctx.reset_transparent();
        demo.render(&mut ctx);

        display.present(&mut target, ctx.surface(), &palette)?;

        if show_fps {
            display.set_title(&format!("tessera - {} - {:.1} fps", demo.name(), avg_fps));
        } else {
            display.set_title(&format!("tessera - {}", demo.name()));
        }
    }

    Ok(())
}
