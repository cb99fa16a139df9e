//! interpose-demo: decorate a small greeter and call each member shape.
//!
//! ## Configuration
//! - INTERPOSE_CONFIG / `--config <path>`: YAML file (see `interpose::config`)
//! - INTERPOSE__ADVICE__SINK: `console` (default) or `tracing`
//! - INTERPOSE__ADVICE__RENDER: `structured` (default) or `json`
//! - INTERPOSE__ADVICE__TRACE_CALLS: wrap calls in a debug span
//! - INTERPOSE_LOG: tracing filter, default "info"

use interpose::config::Config;
use interpose::interfaces::to_value;
use interpose::{arg, args, CallError, Interceptable, MethodTable};
use serde_json::Value;
use tracing::{error, info};

/// Greeter with one member of each shape.
struct ExampleGreeter {
    punctuation: String,
}

impl Interceptable for ExampleGreeter {
    const CLASS_NAME: &'static str = "ExampleGreeter";

    fn prototype(table: &mut MethodTable<Self>) {
        table
            .sync_method("sayHello1", |_, args| {
                to_value(format!("1.Hello, {}!", arg::<String>(&args, 0)?))
            })
            .async_method("sayHelloAsync2", |_, args| {
                Box::pin(async move { to_value(format!("2.Hello, {}!", arg::<String>(&args, 0)?)) })
            })
            .field("punctuation");
    }

    fn own_members(&self, table: &mut MethodTable<Self>) {
        let sync_mark = self.punctuation.clone();
        let async_mark = self.punctuation.clone();
        table
            .sync_method("sayHelloArrow3", move |_, args| {
                to_value(format!("3.Hello, {}{}", arg::<String>(&args, 0)?, sync_mark))
            })
            .async_method("sayHelloArrowAsync4", move |_, args| {
                let mark = async_mark.clone();
                Box::pin(async move {
                    to_value(format!("4.Hello, {}{}", arg::<String>(&args, 0)?, mark))
                })
            });
    }
}

fn shown(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<(), CallError> {
    interpose::utils::bootstrap::init_tracing();

    let config_path = interpose::utils::bootstrap::parse_config_path();
    let config = Config::load(config_path.as_deref()).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    let class = config.decorator().apply::<ExampleGreeter>();
    info!(class = class.name(), wrappers = ?class.wrapper_names(), "Starting interpose-demo");

    let greeter = class.construct(ExampleGreeter {
        punctuation: "!".to_string(),
    });

    println!("class result: {}", shown(&greeter.call("sayHello1", args!["1"])?));
    let pending = greeter.invoke("sayHelloAsync2", args!["2"]);
    println!("class result: {}", shown(&greeter.call("sayHelloArrow3", args!["3"])?));
    let arrow = greeter.invoke("sayHelloArrowAsync4", args!["4"]);

    println!("class result: {}", shown(&pending.settle().await?));
    println!("class result: {}", shown(&arrow.settle().await?));

    Ok(())
}
