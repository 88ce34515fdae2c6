//! Pipes de ejemplo sobre pedidos en JSON.
//!
//! `order_summary_pipe` = parseo (`parse_order_pipe`) + resumen
//! (`summary_pipe`) unidos con `merge`. Los errores tipados son `String`;
//! los faults se convierten con el fault handler del pipe de parseo.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use pipe_core::{empty, empty_with, map, map_async, merge, try_map, Pipe, PipeAsync};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: String,
    pub item_count: u32,
    pub total: f64,
}

/// JSON → `Order`. Un pedido sin items es un fallo tipado.
pub fn parse_order_pipe() -> Pipe<String, Order, String> {
    empty_with(|fault| format!("fault: {fault}")).next(try_map(|raw: String| {
                                                      serde_json::from_str::<Order>(&raw).map_err(|e| e.to_string())
                                                  }))
                                                  .next(try_map(|order: Order| {
                                                      if order.items.is_empty() {
                                                          Err(format!("pedido {} sin items", order.id))
                                                      } else {
                                                          Ok(order)
                                                      }
                                                  }))
}

pub fn summary_pipe() -> Pipe<Order, OrderSummary, String> {
    empty().next(map(|order: Order| {
               let item_count = order.items.iter().map(|i| i.quantity).sum();
               let total = order.items.iter().map(|i| f64::from(i.quantity) * i.unit_price).sum();
               OrderSummary { id: order.id,
                              item_count,
                              total }
           }))
}

pub fn order_summary_pipe() -> Pipe<String, OrderSummary, String> {
    merge(parse_order_pipe(), summary_pipe())
}

/// Variante async: simula la consulta de un descuento antes de resumir.
pub fn discounted_summary_pipe(discount_delay: Duration) -> PipeAsync<String, OrderSummary, String> {
    order_summary_pipe().next_async(map_async(move |summary: OrderSummary| async move {
                                        tokio::time::sleep(discount_delay).await;
                                        let total = if summary.total > 1.0 { summary.total * 0.9 } else { summary.total };
                                        OrderSummary { total, ..summary }
                                    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_valid_order() {
        let raw = r#"{"id":"A-1","items":[{"name":"x","quantity":2,"unit_price":1.5}]}"#;
        let summary = order_summary_pipe().force(raw.to_string()).unwrap();
        assert_eq!(summary,
                   OrderSummary { id: "A-1".into(),
                                  item_count: 2,
                                  total: 3.0 });
    }

    #[test]
    fn empty_order_is_typed_failure() {
        let raw = r#"{"id":"A-2","items":[]}"#;
        let result = order_summary_pipe().run(raw.to_string()).unwrap();
        assert_eq!(result, Err("pedido A-2 sin items".to_string()));
    }

    #[test]
    fn malformed_json_is_typed_failure() {
        assert!(order_summary_pipe().maybe("{".to_string()).is_none());
    }
}
