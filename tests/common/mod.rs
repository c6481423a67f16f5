#![allow(dead_code)]

use bidijson::{
    JArray, JBoolean, JDecimal, JDouble, JInt, JString, JStringRepr, JsonNumber, ObjectCodec,
    SealedCodec,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub name: String,
}

pub fn customer_codec() -> ObjectCodec<Customer> {
    let mut schema = ObjectCodec::builder();
    let id = schema.mandatory("id", JInt, |c: &Customer| c.id);
    let name = schema.mandatory("name", JString, |c: &Customer| c.name.clone());
    schema.build(move |view| {
        Ok(Customer {
            id: view.get(&id)?,
            name: view.get(&name)?,
        })
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub short_desc: String,
    pub long_desc: Option<String>,
    pub price: Option<f64>,
}

pub fn product_codec() -> ObjectCodec<Product> {
    let mut schema = ObjectCodec::builder();
    let id = schema.mandatory("id", JInt, |p: &Product| p.id);
    let short_desc = schema.mandatory("short_desc", JString, |p: &Product| p.short_desc.clone());
    let long_desc = schema.optional("long_description", JString, |p: &Product| {
        p.long_desc.clone()
    });
    let price = schema.optional("price", JDouble, |p: &Product| p.price);
    schema.build(move |view| {
        Ok(Product {
            id: view.get(&id)?,
            short_desc: view.get(&short_desc)?,
            long_desc: view.get(&long_desc)?,
            price: view.get(&price)?,
        })
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceId(pub String);

pub fn invoice_id_codec() -> JStringRepr<InvoiceId> {
    JStringRepr::new(
        |text| {
            if text.is_empty() {
                Err("invoice id must not be empty".to_string())
            } else {
                Ok(InvoiceId(text.to_string()))
            }
        },
        |id: &InvoiceId| id.0.clone(),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: InvoiceId,
    pub vat: bool,
    pub customer: Customer,
    pub items: Vec<Product>,
    pub total: JsonNumber,
}

pub fn invoice_codec() -> ObjectCodec<Invoice> {
    let mut schema = ObjectCodec::builder();
    let id = schema.mandatory("id", invoice_id_codec(), |i: &Invoice| i.id.clone());
    let vat = schema.mandatory("vat-to-pay", JBoolean, |i: &Invoice| i.vat);
    let customer = schema.mandatory("customer", customer_codec(), |i: &Invoice| {
        i.customer.clone()
    });
    let items = schema.mandatory("items", JArray(product_codec()), |i: &Invoice| {
        i.items.clone()
    });
    let total = schema.mandatory("total", JDecimal, |i: &Invoice| i.total.clone());
    schema.build(move |view| {
        Ok(Invoice {
            id: view.get(&id)?,
            vat: view.get(&vat)?,
            customer: view.get(&customer)?,
            items: view.get(&items)?,
            total: view.get(&total)?,
        })
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaxType {
    Domestic,
    Exempt,
    EU,
}

pub fn tax_type_codec() -> JStringRepr<TaxType> {
    JStringRepr::new(
        |text| match text {
            "Domestic" => Ok(TaxType::Domestic),
            "Exempt" => Ok(TaxType::Exempt),
            "EU" => Ok(TaxType::EU),
            other => Err(format!("not a valid TaxType: {other}")),
        },
        |value| {
            match value {
                TaxType::Domestic => "Domestic",
                TaxType::Exempt => "Exempt",
                TaxType::EU => "EU",
            }
            .to_string()
        },
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub name: String,
    pub tax_type: TaxType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Party {
    Human(Person),
    Corp(Company),
}

pub fn person_codec() -> ObjectCodec<Person> {
    let mut schema = ObjectCodec::builder();
    let name = schema.mandatory("name", JString, |p: &Person| p.name.clone());
    schema.build(move |view| {
        Ok(Person {
            name: view.get(&name)?,
        })
    })
}

pub fn company_codec() -> ObjectCodec<Company> {
    let mut schema = ObjectCodec::builder();
    let name = schema.mandatory("name", JString, |c: &Company| c.name.clone());
    let tax_type = schema.mandatory("tax_type", tax_type_codec(), |c: &Company| {
        c.tax_type.clone()
    });
    schema.build(move |view| {
        Ok(Company {
            name: view.get(&name)?,
            tax_type: view.get(&tax_type)?,
        })
    })
}

pub fn party_codec() -> SealedCodec<Party> {
    SealedCodec::builder(|party: &Party| {
        match party {
            Party::Human(_) => "person",
            Party::Corp(_) => "company",
        }
        .to_string()
    })
    .variant(
        "person",
        person_codec(),
        |party| match party {
            Party::Human(person) => Some(person),
            _ => None,
        },
        Party::Human,
    )
    .variant(
        "company",
        company_codec(),
        |party| match party {
            Party::Corp(company) => Some(company),
            _ => None,
        },
        Party::Corp,
    )
    .build()
}
