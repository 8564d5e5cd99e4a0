//! In-memory stub of the PhoneSpot backend routes the admin client uses.
//!
//! Everything is mounted under `/api`. Failure bodies mirror the real
//! backend: `{"success": false, "message": ...}`.

use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@phonespot.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const CUSTOMER_EMAIL: &str = "cliente@phonespot.com";
pub const CUSTOMER_PASSWORD: &str = "cliente123";

const VALID_STATUSES: [&str; 5] = ["pendiente", "procesando", "enviado", "entregado", "cancelado"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub nombre: String,
    pub categoria: String,
    pub precio: f64,
    pub stock: i64,
    pub activo: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "productoId")]
    pub producto_id: String,
    pub cantidad: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub estado: String,
    pub total: f64,
    #[serde(rename = "fechaOrden")]
    pub fecha_orden: String,
    pub productos: Vec<OrderItem>,
}

#[derive(Clone, Debug)]
pub struct User {
    pub email: String,
    pub password: String,
    pub nombre: String,
    pub rol: String,
}

/// Backend state. `current_month` (`YYYY-MM`) decides which orders count
/// toward monthly sales.
#[derive(Clone, Debug, Default)]
pub struct Store {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub users: Vec<User>,
    pub current_month: String,
    tokens: Vec<(String, String)>,
}

impl Store {
    /// Demo catalogue, two accounts and a handful of orders.
    pub fn seeded() -> Self {
        let product = |id: &str, nombre: &str, categoria: &str, precio: f64, stock: i64| Product {
            id: id.to_string(),
            nombre: nombre.to_string(),
            categoria: categoria.to_string(),
            precio,
            stock,
            activo: true,
        };
        let order = |estado: &str, total: f64, fecha: &str, items: &[(&str, i64)]| Order {
            id: Uuid::new_v4().to_string(),
            estado: estado.to_string(),
            total,
            fecha_orden: fecha.to_string(),
            productos: items
                .iter()
                .map(|(id, cantidad)| OrderItem {
                    producto_id: id.to_string(),
                    cantidad: *cantidad,
                })
                .collect(),
        };

        Self {
            products: vec![
                product("prod-1", "iPhone 15", "celulares", 999.0, 5),
                product("prod-2", "Galaxy S24", "celulares", 899.5, 3),
                product("prod-3", "Cargador USB-C", "accesorios", 25.0, 40),
                product("prod-4", "Funda MagSafe", "accesorios", 49.9, 0),
            ],
            orders: vec![
                order("pendiente", 1024.0, "2026-10-02", &[("prod-1", 1), ("prod-3", 1)]),
                order("entregado", 899.5, "2026-09-14", &[("prod-2", 1)]),
                order("entregado", 50.0, "2026-10-05", &[("prod-3", 2)]),
                order("cancelado", 999.0, "2026-10-07", &[("prod-1", 1)]),
            ],
            users: vec![
                User {
                    email: ADMIN_EMAIL.to_string(),
                    password: ADMIN_PASSWORD.to_string(),
                    nombre: "Administrador".to_string(),
                    rol: "admin".to_string(),
                },
                User {
                    email: CUSTOMER_EMAIL.to_string(),
                    password: CUSTOMER_PASSWORD.to_string(),
                    nombre: "Cliente Demo".to_string(),
                    rol: "cliente".to_string(),
                },
            ],
            current_month: "2026-10".to_string(),
            tokens: Vec::new(),
        }
    }

    fn issue_token(&mut self, email: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.push((token.clone(), email.to_string()));
        token
    }

    fn user_for_token(&self, token: &str) -> Option<&User> {
        let email = self.tokens.iter().find(|(t, _)| t == token).map(|(_, e)| e)?;
        self.users.iter().find(|u| &u.email == email)
    }
}

pub type Db = Arc<RwLock<Store>>;

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    app_with_store(Store::seeded())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/productos", get(list_products))
        .route("/productos/{id}/stock", patch(update_stock))
        .route("/ordenes", get(list_orders))
        .route("/ordenes/admin/estadisticas", get(statistics))
        .route("/ordenes/{id}/estado", patch(update_order_status));
    Router::new().nest("/api", api).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn reject(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": false, "message": message })))
}

/// Resolve the bearer token to an admin account.
fn require_admin(store: &Store, headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Token no proporcionado"))?;
    let user = store
        .user_for_token(token)
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Token inválido"))?;
    if user.rol != "admin" {
        return Err(reject(StatusCode::FORBIDDEN, "Acceso denegado"));
    }
    Ok(())
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub identificador: Option<String>,
    pub password: Option<String>,
}

async fn login(State(db): State<Db>, Json(input): Json<LoginInput>) -> Reply {
    let (Some(identifier), Some(password)) = (input.email.or(input.identificador), input.password) else {
        return Err(reject(StatusCode::BAD_REQUEST, "Usuario/Email y contraseña son requeridos"));
    };

    let mut store = db.write().await;
    let user = store
        .users
        .iter()
        .find(|u| u.email == identifier && u.password == password)
        .cloned()
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Usuario o contraseña incorrectos"))?;
    let token = store.issue_token(&user.email);

    Ok(Json(json!({
        "success": true,
        "message": "Login exitoso",
        "token": token,
        "usuario": { "email": user.email, "nombre": user.nombre, "rol": user.rol }
    })))
}

#[derive(Deserialize)]
pub struct ProductFilter {
    pub categoria: Option<String>,
}

/// Public route. Active products only, in-stock first.
async fn list_products(State(db): State<Db>, Query(filter): Query<ProductFilter>) -> Json<Value> {
    let store = db.read().await;
    let matching = store
        .products
        .iter()
        .filter(|p| p.activo)
        .filter(|p| filter.categoria.as_ref().map_or(true, |c| &p.categoria == c));
    let (in_stock, out_of_stock): (Vec<&Product>, Vec<&Product>) = matching.partition(|p| p.stock > 0);
    let count = in_stock.len() + out_of_stock.len();

    Json(json!({
        "success": true,
        "count": count,
        "conStock": in_stock.len(),
        "sinStock": out_of_stock.len(),
        "productos": in_stock.into_iter().chain(out_of_stock).collect::<Vec<_>>(),
    }))
}

#[derive(Deserialize)]
pub struct OrderFilter {
    pub estado: Option<String>,
}

async fn list_orders(State(db): State<Db>, headers: HeaderMap, Query(filter): Query<OrderFilter>) -> Reply {
    let store = db.read().await;
    require_admin(&store, &headers)?;
    let orders: Vec<&Order> = store
        .orders
        .iter()
        .filter(|o| filter.estado.as_ref().map_or(true, |e| &o.estado == e))
        .collect();

    Ok(Json(json!({ "success": true, "count": orders.len(), "ordenes": orders })))
}

async fn statistics(State(db): State<Db>, headers: HeaderMap) -> Reply {
    let store = db.read().await;
    require_admin(&store, &headers)?;

    let count = |estado: &str| store.orders.iter().filter(|o| o.estado == estado).count();
    let billable = || store.orders.iter().filter(|o| o.estado != "cancelado");
    let total_sales: f64 = billable().map(|o| o.total).sum();
    let monthly_sales: f64 = billable()
        .filter(|o| o.fecha_orden.starts_with(&store.current_month))
        .map(|o| o.total)
        .sum();

    Ok(Json(json!({
        "success": true,
        "estadisticas": {
            "totalOrdenes": store.orders.len(),
            "ordenesPendientes": count("pendiente"),
            "ordenesEntregadas": count("entregado"),
            "ventasTotales": total_sales,
            "ventasMensuales": monthly_sales,
        }
    })))
}

#[derive(Deserialize)]
pub struct StockInput {
    pub stock: Option<i64>,
}

async fn update_stock(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<StockInput>,
) -> Reply {
    let mut store = db.write().await;
    require_admin(&store, &headers)?;
    let stock = input
        .stock
        .filter(|s| *s >= 0)
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "Stock inválido"))?;
    let product = store
        .products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Producto no encontrado"))?;
    product.stock = stock;

    Ok(Json(json!({
        "success": true,
        "message": "Stock actualizado exitosamente",
        "producto": product,
    })))
}

#[derive(Deserialize)]
pub struct StatusInput {
    pub estado: Option<String>,
}

/// Cancelling an order returns its quantities to stock.
async fn update_order_status(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<StatusInput>,
) -> Reply {
    let mut store = db.write().await;
    require_admin(&store, &headers)?;
    let estado = input
        .estado
        .filter(|e| VALID_STATUSES.contains(&e.as_str()))
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "Estado inválido"))?;

    let idx = store
        .orders
        .iter()
        .position(|o| o.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Orden no encontrada"))?;

    if estado == "cancelado" && store.orders[idx].estado != "cancelado" {
        let items = store.orders[idx].productos.clone();
        let restocked: HashSet<&str> = items.iter().map(|i| i.producto_id.as_str()).collect();
        for product in store.products.iter_mut().filter(|p| restocked.contains(p.id.as_str())) {
            product.stock += items
                .iter()
                .filter(|i| i.producto_id == product.id)
                .map(|i| i.cantidad)
                .sum::<i64>();
        }
    }

    let order = &mut store.orders[idx];
    order.estado = estado;

    Ok(Json(json!({
        "success": true,
        "message": "Estado actualizado exitosamente",
        "orden": order,
    })))
}
