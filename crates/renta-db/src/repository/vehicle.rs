//! SQLite implementation of [`VehicleRepository`].

use rusqlite::params;
use renta_core::error::{RentaError, RentaResult};
use renta_core::models::vehicle::{
    AvailableVehicle, FleetVehicle, ModelOption, NewVehicle, VehicleStatus,
};
use renta_core::repository::VehicleRepository;

use crate::connection::DbManager;
use crate::error::db_err;

/// SQLite implementation of the fleet repository.
#[derive(Clone)]
pub struct SqliteVehicleRepository {
    db: DbManager,
}

impl SqliteVehicleRepository {
    pub fn new(db: DbManager) -> Self {
        Self { db }
    }
}

impl VehicleRepository for SqliteVehicleRepository {
    fn add_brand(&self, name: &str) -> RentaResult<i64> {
        let conn = self.db.conn();
        conn.execute("INSERT INTO marcas (nombre) VALUES (?1)", params![name])
            .map_err(db_err)?;
        Ok(conn.last_insert_rowid())
    }

    fn add_model(&self, brand_id: i64, name: &str) -> RentaResult<i64> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT INTO modelos (id_marca, nombre) VALUES (?1, ?2)",
            params![brand_id, name],
        )
        .map_err(db_err)?;
        Ok(conn.last_insert_rowid())
    }

    fn create(&self, input: NewVehicle) -> RentaResult<i64> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT INTO vehiculos (id_modelo, placa, anio, color, kilometraje, precio_diario)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                input.model_id,
                input.plate,
                input.year,
                input.color,
                input.mileage,
                input.daily_price,
            ],
        )
        .map_err(db_err)?;
        Ok(conn.last_insert_rowid())
    }

    fn set_status(&self, id: i64, status: VehicleStatus) -> RentaResult<()> {
        let conn = self.db.conn();
        let changed = conn
            .execute(
                "UPDATE vehiculos SET estado = ?1 WHERE id_vehiculo = ?2",
                params![status.as_str(), id],
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(RentaError::NotFound {
                entity: "vehiculo".into(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn list_fleet(&self) -> RentaResult<Vec<FleetVehicle>> {
        let conn = self.db.conn();
        let mut stmt = conn
            .prepare(
                "SELECT v.placa, v.anio, v.color, v.kilometraje, v.precio_diario, v.estado,
                        m.nombre, b.nombre
                 FROM vehiculos v
                 JOIN modelos m ON v.id_modelo = m.id_modelo
                 JOIN marcas b ON m.id_marca = b.id_marca
                 ORDER BY b.nombre, m.nombre",
            )
            .map_err(db_err)?;
        let vehicles = stmt
            .query_map([], |row| {
                let estado: String = row.get(5)?;
                Ok(FleetVehicle {
                    plate: row.get(0)?,
                    year: row.get(1)?,
                    color: row.get(2)?,
                    mileage: row.get(3)?,
                    daily_price: row.get(4)?,
                    // the CHECK constraint admits only the three labels
                    status: VehicleStatus::parse(&estado)
                        .unwrap_or(VehicleStatus::Maintenance),
                    model: row.get(6)?,
                    brand: row.get(7)?,
                })
            })
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(vehicles)
    }

    fn list_available(&self) -> RentaResult<Vec<AvailableVehicle>> {
        let conn = self.db.conn();
        let mut stmt = conn
            .prepare(
                "SELECT v.id_vehiculo, v.precio_diario,
                        b.nombre || ' ' || m.nombre || ' (' || v.placa || ')'
                 FROM vehiculos v
                 JOIN modelos m ON v.id_modelo = m.id_modelo
                 JOIN marcas b ON m.id_marca = b.id_marca
                 WHERE v.estado = 'disponible'
                 ORDER BY b.nombre, m.nombre",
            )
            .map_err(db_err)?;
        let vehicles = stmt
            .query_map([], |row| {
                Ok(AvailableVehicle {
                    id: row.get(0)?,
                    daily_price: row.get(1)?,
                    display_name: row.get(2)?,
                })
            })
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(vehicles)
    }

    fn list_model_options(&self) -> RentaResult<Vec<ModelOption>> {
        let conn = self.db.conn();
        let mut stmt = conn
            .prepare(
                "SELECT m.id_modelo, b.nombre || ' ' || m.nombre AS display_name
                 FROM modelos m
                 JOIN marcas b ON m.id_marca = b.id_marca
                 ORDER BY display_name",
            )
            .map_err(db_err)?;
        let models = stmt
            .query_map([], |row| {
                Ok(ModelOption {
                    id: row.get(0)?,
                    display_name: row.get(1)?,
                })
            })
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(models)
    }
}
