//! Initial schema for the Sitecost ledger.
//!
//! Creates the tenant, job, and financial record tables. All monetary
//! columns are NUMERIC; soft delete is a `deleted_at` timestamp and every
//! read path filters on it.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Enum types
CREATE TYPE contract_status AS ENUM ('draft', 'active', 'complete', 'voided');
CREATE TYPE invoice_status AS ENUM (
    'draft', 'pm_pending', 'accountant_pending', 'owner_pending',
    'approved', 'in_draw', 'paid', 'voided'
);
CREATE TYPE bill_status AS ENUM ('pending', 'partial', 'paid', 'voided');
CREATE TYPE change_order_status AS ENUM (
    'draft', 'internal_review', 'client_presented', 'negotiation',
    'approved', 'rejected', 'withdrawn', 'voided'
);
CREATE TYPE draw_status AS ENUM ('open', 'submitted', 'funded');

-- Companies (tenants)
CREATE TABLE companies (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at TIMESTAMPTZ
);

-- Jobs (projects)
CREATE TABLE jobs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    address TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at TIMESTAMPTZ
);

CREATE INDEX idx_jobs_company ON jobs(company_id) WHERE deleted_at IS NULL;

-- Cost codes
CREATE TABLE cost_codes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    code VARCHAR(32) NOT NULL,
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at TIMESTAMPTZ,
    CONSTRAINT uq_cost_codes_company_code UNIQUE (company_id, code)
);

-- Budget lines
CREATE TABLE budget_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    job_id UUID NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
    cost_code_id UUID REFERENCES cost_codes(id),
    description TEXT NOT NULL,
    phase VARCHAR(64),
    notes TEXT,
    estimated_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    committed_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    actual_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    projected_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    variance_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at TIMESTAMPTZ,
    CONSTRAINT chk_budget_amounts_non_negative CHECK (
        estimated_amount >= 0 AND committed_amount >= 0 AND actual_amount >= 0
    )
);

CREATE INDEX idx_budget_lines_company ON budget_lines(company_id) WHERE deleted_at IS NULL;
CREATE INDEX idx_budget_lines_job ON budget_lines(job_id) WHERE deleted_at IS NULL;

-- Contracts
CREATE TABLE contracts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    job_id UUID NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
    client_id UUID,
    contract_value NUMERIC(18, 2) NOT NULL DEFAULT 0,
    status contract_status NOT NULL DEFAULT 'draft',
    retention_pct NUMERIC(5, 2) NOT NULL DEFAULT 0,
    start_date DATE NOT NULL,
    end_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at TIMESTAMPTZ
);

CREATE INDEX idx_contracts_company_status ON contracts(company_id, status) WHERE deleted_at IS NULL;

-- Client invoices (AR)
CREATE TABLE invoices (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    job_id UUID NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
    client_id UUID,
    amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    status invoice_status NOT NULL DEFAULT 'draft',
    issued_on DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at TIMESTAMPTZ
);

CREATE INDEX idx_invoices_company_status ON invoices(company_id, status) WHERE deleted_at IS NULL;

-- Vendor bills (AP)
CREATE TABLE bills (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    job_id UUID NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
    vendor_id UUID,
    cost_code_id UUID REFERENCES cost_codes(id),
    amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    balance_due NUMERIC(18, 2) NOT NULL DEFAULT 0,
    status bill_status NOT NULL DEFAULT 'pending',
    issued_on DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at TIMESTAMPTZ
);

CREATE INDEX idx_bills_company_status ON bills(company_id, status) WHERE deleted_at IS NULL;

-- Change orders
CREATE TABLE change_orders (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    job_id UUID NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
    contract_id UUID NOT NULL REFERENCES contracts(id),
    budget_line_id UUID NOT NULL REFERENCES budget_lines(id),
    description TEXT NOT NULL,
    materials_cost NUMERIC(18, 2) NOT NULL DEFAULT 0,
    labor_cost NUMERIC(18, 2) NOT NULL DEFAULT 0,
    equipment_cost NUMERIC(18, 2) NOT NULL DEFAULT 0,
    subcontractor_cost NUMERIC(18, 2) NOT NULL DEFAULT 0,
    subtotal NUMERIC(18, 2) NOT NULL DEFAULT 0,
    markup_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    total_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    is_credit BOOLEAN NOT NULL DEFAULT false,
    status change_order_status NOT NULL DEFAULT 'draft',
    presented_at TIMESTAMPTZ,
    submitted_by UUID,
    approved_by UUID,
    approved_at TIMESTAMPTZ,
    rejection_reason TEXT,
    void_reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at TIMESTAMPTZ
);

CREATE INDEX idx_change_orders_company_status ON change_orders(company_id, status) WHERE deleted_at IS NULL;
CREATE INDEX idx_change_orders_budget_line ON change_orders(budget_line_id) WHERE deleted_at IS NULL;

-- Draw requests
CREATE TABLE draw_requests (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    job_id UUID NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
    current_due NUMERIC(18, 2) NOT NULL DEFAULT 0,
    total_earned NUMERIC(18, 2) NOT NULL DEFAULT 0,
    status draw_status NOT NULL DEFAULT 'open',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at TIMESTAMPTZ
);

CREATE INDEX idx_draw_requests_job_status ON draw_requests(job_id, status) WHERE deleted_at IS NULL;
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS draw_requests CASCADE;
DROP TABLE IF EXISTS change_orders CASCADE;
DROP TABLE IF EXISTS bills CASCADE;
DROP TABLE IF EXISTS invoices CASCADE;
DROP TABLE IF EXISTS contracts CASCADE;
DROP TABLE IF EXISTS budget_lines CASCADE;
DROP TABLE IF EXISTS cost_codes CASCADE;
DROP TABLE IF EXISTS jobs CASCADE;
DROP TABLE IF EXISTS companies CASCADE;
DROP TYPE IF EXISTS draw_status;
DROP TYPE IF EXISTS change_order_status;
DROP TYPE IF EXISTS bill_status;
DROP TYPE IF EXISTS invoice_status;
DROP TYPE IF EXISTS contract_status;
";
