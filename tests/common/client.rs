use actix_web::{web, App};
use chrono::{Duration, Utc};
use entity::tender::{self, TenderStatus};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tawreed::{
    db::database_service::DatabaseService,
    types::{
        company::DBCompanyCreate,
        proposal::{NewProposal, ProposalView},
        reference::RNamed,
        tender::{RTenderCreate, TenderListing},
    },
    utils::token::hash_secret,
};

use super::PASSWORD;

static SEQ: AtomicUsize = AtomicUsize::new(0);

fn next() -> usize {
    SEQ.fetch_add(1, Ordering::Relaxed)
}

fn named(en: &str) -> RNamed {
    RNamed {
        name_ar: format!("{en} (ar)"),
        name_en: en.to_string(),
    }
}

/// Ids of one domain with a sub-domain and one region with a city.
#[derive(Clone, Copy, Debug)]
pub struct Catalog {
    pub domain_id: i32,
    pub sub_domain_id: i32,
    pub region_id: i32,
    pub city_id: i32,
}

pub struct TestClient {
    pub db: Arc<DatabaseService>,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(db: Arc<DatabaseService>) -> Self {
        TestClient { db }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .configure(tawreed::routes::configure_routes)
    }

    pub async fn seed_catalog(&self) -> Catalog {
        let domain = self.db.create_domain(named("Construction")).await.expect("Failed to create domain");
        let sub = self
            .db
            .create_sub_domain(domain.id, named("Roads"))
            .await
            .expect("Failed to create sub-domain");
        let region = self.db.create_region(named("Riyadh Region")).await.expect("Failed to create region");
        let city = self
            .db
            .create_city(region.id, named("Riyadh"))
            .await
            .expect("Failed to create city");
        Catalog {
            domain_id: domain.id,
            sub_domain_id: sub.id,
            region_id: region.id,
            city_id: city.id,
        }
    }

    fn company(&self, catalog: &Catalog, email: String, sub_domain_id: Option<i32>) -> DBCompanyCreate {
        DBCompanyCreate {
            company_name: "Test Company".to_string(),
            commercial_record: format!("CR-{}", next()),
            email,
            phone: "0500000000".to_string(),
            password_hash: hash_secret(PASSWORD).expect("Failed to hash password"),
            domain_id: catalog.domain_id,
            sub_domain_id,
            city_id: catalog.city_id,
        }
    }

    /// Registers a buyer and logs it in. Returns `(id, bearer token)`.
    pub async fn create_test_buyer(&self, catalog: &Catalog) -> (i32, String) {
        let email = format!("buyer-{}@test.com", next());
        let buyer = self
            .db
            .create_buyer(self.company(catalog, email.clone(), None))
            .await
            .expect("Failed to create buyer");
        let login = self.db.login_buyer(&email, PASSWORD).await.expect("Failed to log buyer in");
        (buyer.id, login.token)
    }

    pub async fn create_test_supplier(&self, catalog: &Catalog) -> (i32, String) {
        let email = format!("supplier-{}@test.com", next());
        let supplier = self
            .db
            .create_supplier(self.company(catalog, email.clone(), Some(catalog.sub_domain_id)))
            .await
            .expect("Failed to create supplier");
        let login = self
            .db
            .login_supplier(&email, PASSWORD)
            .await
            .expect("Failed to log supplier in");
        (supplier.id, login.token)
    }

    pub fn tender_request(&self, catalog: &Catalog, title: &str, budget: Option<f64>) -> RTenderCreate {
        let now = Utc::now();
        RTenderCreate {
            title: title.to_string(),
            description: "Supply, delivery and installation".to_string(),
            domain_id: catalog.domain_id,
            sub_domain_ids: vec![catalog.sub_domain_id],
            city_id: catalog.city_id,
            submit_deadline: now + Duration::days(30),
            quires_deadline: now + Duration::days(10),
            expected_budget: budget,
        }
    }

    pub async fn open_tender(&self, catalog: &Catalog, buyer_id: i32) -> TenderListing {
        let req = self.tender_request(catalog, "Road resurfacing", Some(100_000.0));
        self.db
            .create_tender(buyer_id, req, Utc::now())
            .await
            .expect("Failed to create tender")
    }

    pub async fn submit_proposal(&self, tender_id: i32, supplier_id: i32, price: f64) -> ProposalView {
        self.db
            .submit_proposal(
                NewProposal {
                    tender_id,
                    supplier_id,
                    price,
                    files: vec![],
                },
                Utc::now(),
            )
            .await
            .expect("Failed to submit proposal")
    }

    /// Moves both deadlines of a tender into the past.
    pub async fn backdate_tender(&self, tender_id: i32) {
        let past = Utc::now() - Duration::hours(1);
        tender::Entity::update_many()
            .col_expr(tender::Column::SubmitDeadline, Expr::value(past))
            .col_expr(tender::Column::QuiresDeadline, Expr::value(past))
            .filter(tender::Column::Id.eq(tender_id))
            .exec(self.db.connection())
            .await
            .expect("Failed to backdate tender");
    }

    /// Changes a tender's status behind the service's back, deadlines untouched.
    pub async fn force_status(&self, tender_id: i32, status: TenderStatus) {
        tender::Entity::update_many()
            .col_expr(tender::Column::StatusId, Expr::value(status.id()))
            .filter(tender::Column::Id.eq(tender_id))
            .exec(self.db.connection())
            .await
            .expect("Failed to force tender status");
    }

    /// A tender in AWARDING with one proposal.
    /// Returns `(tender_id, buyer_id, buyer_token, supplier_id, supplier_token)`.
    pub async fn awarding_tender(&self, catalog: &Catalog) -> (i32, i32, String, i32, String) {
        let (buyer_id, buyer_token) = self.create_test_buyer(catalog).await;
        let (supplier_id, supplier_token) = self.create_test_supplier(catalog).await;
        let t = self.open_tender(catalog, buyer_id).await;
        self.submit_proposal(t.tender.id, supplier_id, 95_000.0).await;
        self.backdate_tender(t.tender.id).await;
        let res = self.db.expire_tenders(Utc::now()).await.expect("Failed to expire tenders");
        assert!(res.tender_ids.contains(&t.tender.id));
        (t.tender.id, buyer_id, buyer_token, supplier_id, supplier_token)
    }
}
