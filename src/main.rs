use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_booking::config::environment::EnvironmentConfig;
use fleet_booking::database::DatabaseConnection;
use fleet_booking::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚐 Fleet Booking - API de reservas de vehículos");
    info!("================================================");

    let config = match EnvironmentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración inválida: {}", e);
            return Err(anyhow::anyhow!("Error de configuración: {}", e));
        }
    };
    info!("⚙️ Entorno: {}", config.environment);
    if config.is_production() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS_ORIGINS vacío en producción: se aceptan todos los orígenes");
    }

    // Inicializar base de datos
    let db_connection = DatabaseConnection::new(config.database.clone());
    if let Err(e) = db_connection.run_migrations().await {
        error!("❌ Error aplicando migraciones: {}", e);
        return Err(anyhow::anyhow!("Error de base de datos: {}", e));
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(db_connection, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /auth/register - Registro de usuario");
    info!("   POST /auth/login - Login");
    info!("   POST /auth/create-super-admin - Crear super admin inicial");
    info!("👤 Usuarios:");
    info!("   GET  /account - Perfil propio");
    info!("   PUT  /account - Editar perfil propio");
    info!("   GET  /user - Listar usuarios");
    info!("   POST /user - Crear usuario");
    info!("   PUT  /user - Editar usuario");
    info!("   DELETE /user?id= - Eliminar usuario");
    info!("   GET  /user/driver - Listar conductores");
    info!("🚗 Vehículos:");
    info!("   GET  /car - Listar vehículos");
    info!("   POST /car - Crear vehículo");
    info!("   PUT  /car/:id - Actualizar vehículo");
    info!("   DELETE /car/:id - Eliminar vehículo");
    info!("   GET  /available-cars - Vehículos disponibles");
    info!("   GET  /available-drivers - Conductores disponibles");
    info!("📝 Solicitudes:");
    info!("   POST /form - Crear solicitud");
    info!("   GET  /requests - Listar solicitudes");
    info!("   GET  /requests/:id - Obtener solicitud");
    info!("   PUT  /requests/:id/assign - Asignar vehículo y conductor");
    info!("   PUT  /requests/:id/approve - Aprobar solicitud");
    info!("   PUT  /requests/:id/reject - Rechazar solicitud");
    info!("   GET  /history - Historial según rol");
    info!("   GET  /history/:user_id - Historial de un solicitante");
    info!("📊 Reportes:");
    info!("   GET  /car-usage - Estadísticas de uso");
    info!("   GET  /car-usage/download?type=car|driver - Exportar CSV");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
