// Admin customer endpoints (`manageCustomer/`)

use tracing::debug;

use super::DASHBOARD;
use crate::client::HostelClient;
use crate::error::Error;
use crate::models::Customer;

fn path(suffix: &str) -> String {
    format!("{DASHBOARD}/manageCustomer/{suffix}")
}

impl HostelClient {
    /// `GET manageCustomer/findAll`
    pub async fn list_customers(&self) -> Result<Vec<Customer>, Error> {
        self.get(&path("findAll")).await
    }

    /// `GET manageCustomer/findById?customer_id=`
    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer, Error> {
        self.get_with_params(&path("findById"), &[("customer_id", customer_id.to_owned())])
            .await
    }

    /// `GET manageCustomer/byemail?email=`
    pub async fn find_customer_by_email(&self, email: &str) -> Result<Customer, Error> {
        self.get_with_params(&path("byemail"), &[("email", email.to_owned())])
            .await
    }

    /// `POST manageCustomer/createCustomer`
    pub async fn create_customer(&self, customer: &Customer) -> Result<(), Error> {
        debug!(email = %customer.email, "creating customer");
        self.post_no_response(&path("createCustomer"), customer, &[])
            .await
    }

    /// `PUT manageCustomer/updateCustomer`
    pub async fn update_customer(&self, customer: &Customer) -> Result<(), Error> {
        debug!(customer_id = ?customer.customer_id, "updating customer");
        self.put_no_response(&path("updateCustomer"), Some(customer), &[])
            .await
    }

    /// `DELETE manageCustomer/deleteCustomer?customer_id=`
    pub async fn delete_customer(&self, customer_id: &str) -> Result<(), Error> {
        debug!(customer_id, "deleting customer");
        self.delete(
            &path("deleteCustomer"),
            &[("customer_id", customer_id.to_owned())],
        )
        .await
    }
}
