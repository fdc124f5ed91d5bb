use config_binder::{settings, Config, Constructor, Settings};

settings! {
    #[derive(Debug)]
    struct MailSettings {
        server: Option<String>,
        port: i32,
        use_tls: Option<bool>,
        recipients: Option<Vec<String>>,
    }
}

#[derive(Debug)]
struct AppSettings {
    server_address: String,
    use_some_function: bool,
    timeout_in_seconds: i32,
}

impl Settings for AppSettings {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::new(|args| {
            Ok(AppSettings {
                server_address: args.next::<Option<String>>()?.unwrap_or_default(),
                use_some_function: args.next()?,
                timeout_in_seconds: args.next::<Option<i32>>()?.unwrap_or(1000),
            })
        })
        .param_of::<Option<String>>("ServerAddress")
        .param_of::<bool>("UseSomeFunction")
        .param_of::<Option<i32>>("TimeoutInSeconds")]
    }
}

fn main() -> Result<(), config_binder::ConfigError> {
    let config = Config::builder()
        .with_file("demos/app.toml", true)
        .with_env("DEMO", "__");

    let app: AppSettings = config.read_from_app_settings()?;
    let mail: MailSettings = config.read_from_section("mail")?;

    println!("App: {app:?}");
    println!(
        "Mail: {}:{} tls={:?} -> {:?}",
        mail.server().as_deref().unwrap_or("-"),
        mail.port(),
        mail.use_tls(),
        mail.recipients()
    );

    Ok(())
}
