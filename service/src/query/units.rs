//! [`Query`] collection related to multiple [`Unit`]s.

use std::collections::BTreeMap;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{building, unit, Unit},
    infra::{database, Database},
    partition, Service,
};
#[cfg(doc)]
use crate::domain::Building;

use super::Query;

/// [`Query`] of the [`Unit`]s of a [`Building`], grouped by
/// [`unit::Floor`]s.
///
/// Floors go in ascending order, and [`Unit`]s within a floor are ordered
/// by their [`unit::Number`]s.
#[derive(Clone, Copy, Debug)]
pub struct ByFloor {
    /// ID of the [`Building`] to query the [`Unit`]s of.
    pub building_id: building::Id,
}

impl<Db> Query<ByFloor> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Unit>, building::Id>>,
        Ok = Vec<Unit>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = BTreeMap<unit::Floor, Vec<Unit>>;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        ByFloor { building_id }: ByFloor,
    ) -> Result<Self::Ok, Self::Err> {
        let units = self
            .database()
            .execute(Select(By::<Vec<Unit>, _>::new(building_id)))
            .map_err(tracerr::wrap!())?;

        Ok(partition::group_by_floor(&units)
            .into_iter()
            .map(|(floor, units)| {
                (floor, units.into_iter().cloned().collect())
            })
            .collect())
    }
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::{DateTime, Money};

    use crate::{
        domain::{building, unit, Unit},
        infra::{database::memory::Tables, Memory},
        Config, Query as _, Service,
    };

    use super::ByFloor;

    fn unit(building_id: building::Id, number: &str, floor: u16) -> Unit {
        Unit {
            id: unit::Id::new(),
            building_id,
            number: unit::Number::new(number).unwrap(),
            floor: unit::Floor::new(floor).unwrap(),
            size: unit::Area::new(100).unwrap(),
            kind: unit::Kind::Storage,
            status: unit::Status::Available,
            monthly_rent: "90GBP".parse::<Money>().unwrap(),
            amenities: BTreeSet::new(),
            notes: None,
            created_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn groups_building_units() {
        let (b1, b2) = (building::Id::new(), building::Id::new());
        let svc = Service::new(
            Config::default(),
            Memory::new(Tables {
                units: vec![
                    unit(b1, "302", 3),
                    unit(b2, "101", 1),
                    unit(b1, "301", 3),
                    unit(b1, "105", 1),
                ],
                ..Tables::default()
            }),
        );

        let floors = svc.execute(ByFloor { building_id: b1 }).unwrap();

        let layout = floors
            .iter()
            .map(|(floor, units)| {
                let numbers =
                    units.iter().map(|u| u.number.to_string()).collect();
                (floor.get(), numbers)
            })
            .collect::<Vec<(u16, Vec<String>)>>();
        assert_eq!(
            layout,
            [
                (1, vec!["105".to_owned()]),
                (3, vec!["301".to_owned(), "302".to_owned()]),
            ],
        );
    }
}
