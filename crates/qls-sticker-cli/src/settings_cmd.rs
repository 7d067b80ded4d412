use crate::cli::SettingsAction;
use crate::settings::SettingsStore;

pub fn run(action: SettingsAction, store: &SettingsStore) -> Result<(), i32> {
    match action {
        SettingsAction::Path => println!("{}", store.path().display()),
        SettingsAction::Show => {
            let settings = store.load();
            if settings.is_empty() {
                println!("No saved settings.");
            } else {
                let json = serde_json::to_string_pretty(&settings).map_err(|e| {
                    eprintln!("Error: {e}");
                    1
                })?;
                println!("{json}");
            }
        }
        SettingsAction::Clear => match store.clear() {
            Ok(true) => println!("Removed {}", store.path().display()),
            Ok(false) => println!("No saved settings."),
            Err(e) => {
                eprintln!("Error: cannot remove {}: {e}", store.path().display());
                return Err(1);
            }
        },
    }

    Ok(())
}
