//! [`Record`] implementations for domain entities.

use std::borrow::Cow;

use common::{DateTime, Recognized};

use crate::domain::{
    application, building, lease, person, unit, Application, Building, Lease,
    Person,
};

use super::Record;

impl Record for Application {
    type Kind = application::Kind;
    type Status = application::Status;

    fn kind(&self) -> Option<Self::Kind> {
        Some(self.kind())
    }

    fn status(&self) -> &Recognized<Self::Status> {
        &self.header().status
    }

    fn priority(&self) -> Option<&Recognized<application::Priority>> {
        Some(&self.header().priority)
    }

    fn assignee(&self) -> Option<person::StaffId> {
        self.header().assignee_id
    }

    fn sorted_at(&self) -> DateTime {
        self.header().submitted_at.coerce()
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let header = self.header();
        let mut fields = vec![header.id.to_string().into()];
        person_fields(&header.applicant, &mut fields);
        fields.extend(header.notes.as_ref().map(|n| n.as_ref().into()));
        if let Some(unit) = self.unit() {
            unit_fields(unit, &mut fields);
        }
        fields
    }
}

impl Record for Building {
    type Kind = building::Kind;
    type Status = building::Status;

    fn kind(&self) -> Option<Self::Kind> {
        self.kind.known()
    }

    fn status(&self) -> &Recognized<Self::Status> {
        &self.status
    }

    fn assignee(&self) -> Option<person::StaffId> {
        self.manager_id
    }

    fn sorted_at(&self) -> DateTime {
        self.created_at.coerce()
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            self.id.to_string().into(),
            self.name.as_ref().into(),
            self.address.as_ref().into(),
        ];
        fields.extend(self.notes.as_ref().map(|n| n.as_ref().into()));
        fields
    }
}

impl Record for Lease {
    type Kind = lease::Kind;
    type Status = lease::Status;

    fn kind(&self) -> Option<Self::Kind> {
        self.kind.known()
    }

    fn status(&self) -> &Recognized<Self::Status> {
        &self.status
    }

    fn assignee(&self) -> Option<person::StaffId> {
        self.agent_id
    }

    fn sorted_at(&self) -> DateTime {
        self.created_at.coerce()
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![self.id.to_string().into()];
        person_fields(&self.tenant, &mut fields);
        fields.extend(self.notes.as_ref().map(|n| n.as_ref().into()));
        unit_fields(&self.unit, &mut fields);
        fields
    }
}

/// Pushes the searchable fields of the provided [`Person`].
fn person_fields<'a>(person: &'a Person, fields: &mut Vec<Cow<'a, str>>) {
    fields.push(person.full_name().into());
    fields.push(person.email.as_ref().into());
}

/// Pushes the searchable fields of the provided [`unit::Reference`].
fn unit_fields<'a>(
    reference: &'a unit::Reference,
    fields: &mut Vec<Cow<'a, str>>,
) {
    fields.push(reference.building_name.as_ref().into());
    fields.push(reference.unit_number.as_ref().into());
    fields.push(reference.unit_kind.to_string().into());
}

#[cfg(test)]
mod spec {
    use crate::{
        collection::{query, Filter, SortKey, Spec},
        domain::{application, Application, Building, Lease},
    };

    fn applications() -> Vec<Application> {
        serde_json::from_str(
            r#"[
                {
                    "type": "rental",
                    "id": "00000000-0000-4000-8000-000000000001",
                    "applicant": {
                        "firstName": "Maria",
                        "lastName": "Garcia",
                        "email": "maria@example.com"
                    },
                    "status": "pending",
                    "priority": "medium",
                    "submittedAt": "2024-03-01T10:00:00Z",
                    "updatedAt": "2024-03-01T10:00:00Z",
                    "unit": {
                        "buildingName": "Harbor Point",
                        "unitNumber": "12B",
                        "unitType": "residential"
                    }
                },
                {
                    "type": "maintenance",
                    "id": "00000000-0000-4000-8000-000000000002",
                    "applicant": {
                        "firstName": "Tom",
                        "lastName": "Baker",
                        "email": "tom@example.com"
                    },
                    "status": "in_review",
                    "priority": "urgent",
                    "assigneeId": "00000000-0000-4000-8000-0000000000aa",
                    "notes": "Water heater replaced last year",
                    "submittedAt": "2024-03-03T10:00:00Z",
                    "updatedAt": "2024-03-04T10:00:00Z",
                    "unit": {
                        "buildingName": "Elm Court",
                        "unitNumber": "3",
                        "unitType": "storage"
                    },
                    "description": "No hot water"
                },
                {
                    "type": "general",
                    "id": "00000000-0000-4000-8000-000000000003",
                    "applicant": {
                        "firstName": "Ann",
                        "lastName": "Lee",
                        "email": "ann@lee.org"
                    },
                    "status": "escalated",
                    "priority": "low",
                    "submittedAt": "2024-03-02T10:00:00Z",
                    "updatedAt": "2024-03-02T10:00:00Z",
                    "description": "Parking permit"
                }
            ]"#,
        )
        .unwrap()
    }

    fn ids(visible: &[&Application]) -> Vec<String> {
        visible
            .iter()
            .map(|a| a.id().to_string()[34..].to_owned())
            .collect()
    }

    #[test]
    fn searches_applicant_and_unit() {
        let apps = applications();

        for (search, expected) in [
            ("maria garcia", vec!["01"]),
            ("MARIAGARCIA", vec![]),
            ("harbor", vec!["01"]),
            ("12b", vec!["01"]),
            ("storage", vec!["02"]),
            ("heater", vec!["02"]),
            ("lee.org", vec!["03"]),
            ("0000-0000", vec!["02", "03", "01"]),
            ("-000000000003", vec!["03"]),
        ] {
            let view = query(
                &apps,
                &Spec {
                    search: search.into(),
                    ..Spec::default()
                },
            );
            assert_eq!(ids(&view.visible), expected, "{search}");
        }
    }

    #[test]
    fn filters_by_kind_and_sorts_by_priority() {
        let apps = applications();

        let view = query(
            &apps,
            &Spec {
                kind: Filter::Only(application::Kind::Maintenance.into()),
                ..Spec::default()
            },
        );
        assert_eq!(ids(&view.visible), ["02"]);

        let view = query(
            &apps,
            &Spec {
                sort: SortKey::Priority,
                ..Spec::default()
            },
        );
        assert_eq!(ids(&view.visible), ["02", "01", "03"]);

        let view = query(
            &apps,
            &Spec {
                sort: SortKey::Status,
                ..Spec::default()
            },
        );
        assert_eq!(ids(&view.visible), ["02", "01", "03"]);
    }

    #[test]
    fn counts_applications() {
        let apps = applications();

        let stats = query(&apps, &Spec::default()).stats;

        assert_eq!(stats.total, 3);
        assert_eq!(stats.unassigned, 2);
        assert_eq!(stats.by_status.get(application::Status::Pending), 1);
        assert_eq!(stats.by_status.get(application::Status::Approved), 0);
        assert_eq!(stats.by_status.unknown, 1);
        assert_eq!(stats.by_priority.get(application::Priority::Urgent), 1);
    }

    #[test]
    fn queries_buildings_and_leases() {
        let buildings: Vec<Building> = serde_json::from_str(
            r#"[
                {
                    "id": "00000000-0000-4000-8000-000000000011",
                    "name": "Harbor Point",
                    "address": "1 Harbor Way",
                    "type": "residential",
                    "status": "active",
                    "createdAt": "2023-01-01T00:00:00Z",
                    "updatedAt": "2023-01-01T00:00:00Z"
                },
                {
                    "id": "00000000-0000-4000-8000-000000000012",
                    "name": "Elm Court",
                    "address": "5 Elm St",
                    "type": "commercial",
                    "status": "inactive",
                    "createdAt": "2023-06-01T00:00:00Z",
                    "updatedAt": "2023-06-01T00:00:00Z"
                }
            ]"#,
        )
        .unwrap();

        let view = query(
            &buildings,
            &Spec {
                search: "elm st".into(),
                ..Spec::default()
            },
        );
        assert_eq!(view.visible.len(), 1);
        assert_eq!(view.visible[0].name.as_ref(), "Elm Court");

        let view = query(
            &buildings,
            &Spec {
                priority: "high".parse().unwrap(),
                ..Spec::default()
            },
        );
        assert!(view.visible.is_empty());
        assert_eq!(view.stats.by_priority.get(application::Priority::High), 0);

        let leases: Vec<Lease> = serde_json::from_str(
            r#"[{
                "id": "00000000-0000-4000-8000-000000000021",
                "unitId": "00000000-0000-4000-8000-000000000031",
                "unit": {
                    "buildingName": "Harbor Point",
                    "unitNumber": "12B",
                    "unitType": "residential"
                },
                "tenant": {
                    "firstName": "Maria",
                    "lastName": "Garcia",
                    "email": "maria@example.com"
                },
                "type": "fixed_term",
                "status": "active",
                "monthlyRent": "1850USD",
                "startsAt": "2024-04-01T00:00:00Z",
                "endsAt": "2025-03-31T00:00:00Z",
                "createdAt": "2024-03-15T00:00:00Z",
                "updatedAt": "2024-03-15T00:00:00Z"
            }]"#,
        )
        .unwrap();

        let view = query(
            &leases,
            &Spec {
                status: "active".parse().unwrap(),
                search: "garcia".into(),
                ..Spec::default()
            },
        );
        assert_eq!(view.visible.len(), 1);
        assert_eq!(view.stats.unassigned, 1);
    }
}
