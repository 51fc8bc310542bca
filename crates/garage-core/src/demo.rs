//! Demo orders for an empty board.

use jiff::civil::date;
use log::info;

use crate::{
    backend::OrderBackend,
    error::Result,
    models::{Order, Priority, Status},
    validation::NewOrderForm,
};

struct DemoOrder {
    title: &'static str,
    description: &'static str,
    customer: &'static str,
    make: &'static str,
    model: &'static str,
    year: &'static str,
    assignee: Option<&'static str>,
    status: Status,
    due: Option<(i16, i8, i8)>,
    priority: Priority,
}

const DEMO_ORDERS: [DemoOrder; 6] = [
    DemoOrder {
        title: "Oil Change",
        description: "Full synthetic oil change and filter replacement",
        customer: "John Smith",
        make: "Toyota",
        model: "Camry",
        year: "2019",
        assignee: Some("Mike Johnson"),
        status: Status::Pending,
        due: Some((2023, 5, 10)),
        priority: Priority::Medium,
    },
    DemoOrder {
        title: "Brake Replacement",
        description: "Front brake pad and rotor replacement",
        customer: "Sarah Williams",
        make: "Honda",
        model: "Civic",
        year: "2020",
        assignee: Some("Mike Johnson"),
        status: Status::InProgress,
        due: Some((2023, 5, 11)),
        priority: Priority::High,
    },
    DemoOrder {
        title: "Tire Rotation",
        description: "Rotate and balance all tires",
        customer: "Robert Johnson",
        make: "Ford",
        model: "F-150",
        year: "2021",
        assignee: None,
        status: Status::Pending,
        due: None,
        priority: Priority::Low,
    },
    DemoOrder {
        title: "AC Repair",
        description: "Diagnose and fix AC not cooling",
        customer: "Jennifer Lee",
        make: "BMW",
        model: "X5",
        year: "2018",
        assignee: Some("Alex Turner"),
        status: Status::InProgress,
        due: Some((2023, 5, 12)),
        priority: Priority::High,
    },
    DemoOrder {
        title: "Battery Replacement",
        description: "Replace battery and test charging system",
        customer: "Michael Brown",
        make: "Chevrolet",
        model: "Malibu",
        year: "2017",
        assignee: None,
        status: Status::Completed,
        due: None,
        priority: Priority::Medium,
    },
    DemoOrder {
        title: "Transmission Service",
        description: "Flush and replace transmission fluid",
        customer: "David Wilson",
        make: "Nissan",
        model: "Altima",
        year: "2020",
        assignee: Some("Chris Adams"),
        status: Status::Completed,
        due: Some((2023, 5, 9)),
        priority: Priority::Medium,
    },
];

/// Create the demo orders through `backend`, moving each into its column.
pub async fn seed_demo_orders<B: OrderBackend>(backend: &B) -> Result<Vec<Order>> {
    let mut created = Vec::with_capacity(DEMO_ORDERS.len());
    for demo in &DEMO_ORDERS {
        let form = NewOrderForm {
            title: demo.title.to_string(),
            description: Some(demo.description.to_string()),
            priority: demo.priority,
            customer_name: demo.customer.to_string(),
            make: demo.make.to_string(),
            model: demo.model.to_string(),
            year: demo.year.to_string(),
            due_date: demo.due.map(|(y, m, d)| date(y, m, d)),
            assigned_to: demo.assignee.map(String::from),
        };
        let valid = form.validate()?;
        let mut order = backend.create_order(&valid).await?;
        if demo.status != Status::Pending {
            order = backend.update_status(&order.id, demo.status).await?;
        }
        created.push(order);
    }
    info!("Seeded {} demo orders", created.len());
    Ok(created)
}
