use std::time::Duration;

use log::{info, warn};

use lazypipe_rust::config::AppConfig;
use lazypipe_rust::errors::AppError;
use lazypipe_rust::orders::{discounted_summary_pipe, order_summary_pipe, parse_order_pipe, summary_pipe, OrderSummary};
use lazypipe_rust::{concat, empty, map, merge, LazyPipe, PIPE_CONFIG};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    env_logger::Builder::new().filter_level(config.log_level).init();
    info!("engine config: {:?}", *PIPE_CONFIG);

    // Pipe síncrono: parseo + resumen
    let pipe = order_summary_pipe();
    let summary = pipe.force(config.demo_input.clone())?;
    println!("[sync] {}", serde_json::to_string_pretty(&summary)?);

    // El mismo pipe con un pedido inválido termina en un fallo tipado
    match pipe.run("{\"id\":\"B-1\",\"items\":[]}".to_string()) {
        Ok(Ok(summary)) => println!("[sync] inesperado: {summary:?}"),
        Ok(Err(failure)) => println!("[sync] fallo tipado: {failure}"),
        Err(unhandled) => warn!("fault sin manejar: {unhandled}"),
    }

    // Pipe async derivado del síncrono
    let discounted = discounted_summary_pipe(Duration::from_millis(20));
    let summary = discounted.force(config.demo_input.clone()).await?;
    println!("[async] total con descuento: {:.2}", summary.total);

    // concat: dos pedidos en un solo step
    let pair = concat(order_summary_pipe(), order_summary_pipe()).next(map(|(a, b): (OrderSummary, OrderSummary)| {
                                                                      OrderSummary { id: format!("{}+{}", a.id, b.id),
                                                                                     item_count: a.item_count + b.item_count,
                                                                                     total: a.total + b.total }
                                                                  }));
    info!("concat pipe kind={:?} steps={}", pair.kind(), pair.len());
    let combined = pair.force((config.demo_input.clone(), config.demo_input.clone()))?;
    println!("[concat] {}", serde_json::to_string(&combined)?);

    // merge explícito de las dos mitades más un step final
    let totals = merge(parse_order_pipe(), summary_pipe()).next(map(|s: OrderSummary| s.total));
    println!("[merge] total: {:?}", totals.maybe(config.demo_input.clone()));

    let identity = empty::<String, String>();
    println!("[empty] {}", identity.force("sin cambios".to_string())?);
    Ok(())
}
