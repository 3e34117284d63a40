use utoipa::OpenApi;

use directory::api::rest::dto::{
    CompanyDto, CompanyShortDto, CreateCompanyReq, CreateDocumentReq, CreateLinkReq,
    CreateOrderReq, CreateProfessionReq, CreateUserReq, DocumentDto, LinkDto, LinkWithCompanyDto,
    LinkWithUserDto, OrderDto, PatchCompanyReq, PatchUserReq, ProfessionDto, ProfessionShortDto,
    UpdateCompanyReq, UpdateDocumentReq, UpdateProfessionReq, UpdateUserReq, UserDto, UserShortDto,
};
use directory::api::rest::handlers::{companies, documents, links, orders, professions, users};
use directory::api::rest::problem::Problem;
use listing_core::Page;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Backoffice Server",
        description = "Relational back-office CRUD service with sortable pagination"
    ),
    paths(
        professions::create_profession,
        professions::get_profession,
        professions::list_professions,
        professions::update_profession,
        professions::delete_profession,
        users::create_user,
        users::get_user,
        users::list_users,
        users::update_user,
        users::patch_user,
        users::delete_user,
        companies::create_company,
        companies::get_company,
        companies::list_companies,
        companies::update_company,
        companies::patch_company,
        companies::delete_company,
        orders::create_order,
        orders::get_order,
        orders::list_orders,
        orders::delete_order,
        documents::create_document,
        documents::get_document,
        documents::list_documents,
        documents::update_document,
        documents::delete_document,
        links::create_link,
        links::delete_link,
        links::list_links,
    ),
    components(schemas(
        Problem,
        ProfessionDto,
        ProfessionShortDto,
        CreateProfessionReq,
        UpdateProfessionReq,
        UserDto,
        UserShortDto,
        CreateUserReq,
        UpdateUserReq,
        PatchUserReq,
        CompanyDto,
        CompanyShortDto,
        CreateCompanyReq,
        UpdateCompanyReq,
        PatchCompanyReq,
        OrderDto,
        CreateOrderReq,
        DocumentDto,
        CreateDocumentReq,
        UpdateDocumentReq,
        LinkDto,
        CreateLinkReq,
        LinkWithCompanyDto,
        LinkWithUserDto,
        Page<UserDto>,
        Page<ProfessionDto>,
        Page<CompanyDto>,
        Page<OrderDto>,
        Page<DocumentDto>,
        Page<LinkWithCompanyDto>,
        Page<LinkWithUserDto>,
    ))
)]
pub struct ApiDoc;
