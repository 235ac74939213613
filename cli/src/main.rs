use floatview_core::platform::PermissionState;
use floatview_core::{
    Config, HostContext, HostEvent, HostLifecycleBinder, OverlayController,
};
use log::{error, info, warn};
use std::io::{self, BufRead};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod cli;
mod logger;
mod sim_platform;

use sim_platform::SimPlatform;

fn print_menu() {
    println!();
    println!("FloatView manual test harness — commands:");
    println!("  attach  | a   show the overlay");
    println!("  detach  | d   hide the overlay");
    println!("  fg            host enters the foreground");
    println!("  bg            host leaves the foreground");
    println!("  destroy       host is destroyed (releases the overlay)");
    println!("  grant         answer a pending permission prompt with Granted");
    println!("  deny          answer a pending permission prompt with Denied");
    println!("  state   | s   print the current lifecycle state");
    println!("  help    | h   print this menu");
    println!("  quit    | q   release and exit");
    println!();
}

fn main() {
    let args = cli::parse_args();

    if let Err(e) = logger::init_logger(args.quiet, args.verbose) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    println!("FloatView {}", floatview_core::version());

    match Config::load(args.config_path.as_deref().and_then(|p| p.to_str()), true) {
        Ok(config) => Config::set_config(config),
        Err(e) => warn!("could not load config ({}), using defaults", e),
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        println!("\nReceived Ctrl+C, shutting down...");
        shutdown_clone.store(true, Ordering::SeqCst);
    }) {
        warn!("could not install Ctrl+C handler: {}", e);
    }

    let platform = SimPlatform::new(args.permission);
    let host = HostContext::new("floatview-demo");

    let controller = OverlayController::new(platform.clone(), platform.clone());
    controller.set_listener(|event| info!("overlay event: {:?}", event));

    if let Err(e) = controller.init(Rc::downgrade(&host)) {
        error!("could not initialize the overlay lifecycle: {}", e);
        return;
    }

    let binder = match HostLifecycleBinder::register(&controller) {
        Ok(binder) => binder,
        Err(e) => {
            error!("could not register the host lifecycle binder: {}", e);
            return;
        }
    };

    // The host comes up foregrounded, exactly like a freshly resumed app.
    binder.dispatch(HostEvent::ForegroundEntered);

    print_menu();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };

        match line.trim() {
            "" => {}
            "attach" | "a" => match controller.attach() {
                Ok(outcome) => info!("attach -> {:?}", outcome),
                Err(e) => warn!("attach failed: {}", e),
            },
            "detach" | "d" => match controller.detach() {
                Ok(outcome) => info!("detach -> {:?}", outcome),
                Err(e) => warn!("detach failed: {}", e),
            },
            "fg" => binder.dispatch(HostEvent::ForegroundEntered),
            "bg" => binder.dispatch(HostEvent::ForegroundExited),
            "destroy" => binder.dispatch(HostEvent::Destroyed),
            "grant" => {
                if !platform.resolve_prompt(PermissionState::Granted) {
                    warn!("no permission prompt is outstanding");
                }
            }
            "deny" => {
                if !platform.resolve_prompt(PermissionState::Denied) {
                    warn!("no permission prompt is outstanding");
                }
            }
            "state" | "s" => println!("lifecycle state: {:?}", controller.current_state()),
            "help" | "h" | "menu" => print_menu(),
            "quit" | "q" => break,
            other => warn!("unknown command '{}', try 'help'", other),
        }
    }

    controller.release();
    println!("FloatView stopped");
}
