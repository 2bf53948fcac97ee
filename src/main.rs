use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use erp_access::identity::{
    landing_path, notifications_path, route_entry, view_mode, CredentialProvider,
    DirectoryAuthProvider, LoginRequest, SessionStore, User, ViewMode,
};
use erp_access::security::Directory;

fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    let session_dir = std::env::var("ERP_SESSION_DIR").unwrap_or_else(|_| ".erp_session".to_string());
    info!(
        target: "erp",
        "ERP access starting: RUST_LOG='{}', session_dir='{}'",
        rust_log, session_dir
    );

    // Route tables are configuration; a hole here means nothing downstream
    // can be trusted.
    erp_access::identity::verify_route_table()?;

    let store = SessionStore::open(&session_dir);
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [cmd, identifier, password] if cmd == "login" => {
            let provider = DirectoryAuthProvider::new(Directory::seed_demo()?);
            let req = LoginRequest { identifier: identifier.clone(), password: password.clone() };
            match provider.login(&req) {
                Ok(user) => {
                    if let Err(e) = store.set(user.clone()) {
                        eprintln!("warning: {}", e.user_message());
                    }
                    print_session(&user);
                }
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                }
            }
        }
        [cmd] if cmd == "whoami" => match store.load() {
            Some(user) => print_session(&user),
            None => println!("not signed in; go to {}", landing_path(None)),
        },
        [cmd] if cmd == "logout" => {
            store.clear()?;
            println!("signed out; go to {}", landing_path(None));
        }
        _ => {
            eprintln!("usage: erp-access login <identifier> <password> | whoami | logout");
            std::process::exit(2);
        }
    }
    Ok(())
}

fn print_session(user: &User) {
    let entry = route_entry(user.role);
    println!("{} ({})", user.name, entry.display_name);
    if let Some(dept) = &user.department {
        println!("department: {dept}");
    }
    println!("landing: {}", landing_path(Some(user)));
    for item in entry.nav {
        println!("  {:<18} {}", item.label, item.path(entry.base_path));
    }
    println!("  {:<18} {}", "Notifications", notifications_path(user.role));
    if view_mode(user.role) == ViewMode::ViewOnly {
        println!("  (shared admin pages are view-only for this role)");
    }
}
